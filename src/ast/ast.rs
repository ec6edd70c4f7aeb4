use std::{mem, ops::Deref};

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Static metadata that drives the expression climber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub symbol: TokenKind,
    pub precedence: u8,
    pub associativity: Associativity,
    pub is_unary: bool,
}

impl OperatorDescriptor {
    pub const fn binary(symbol: TokenKind, precedence: u8, associativity: Associativity) -> Self {
        OperatorDescriptor {
            symbol,
            precedence,
            associativity,
            is_unary: false,
        }
    }

    pub const fn unary(symbol: TokenKind, precedence: u8) -> Self {
        OperatorDescriptor {
            symbol,
            precedence,
            associativity: Associativity::Right,
            is_unary: true,
        }
    }

    /// Minimum precedence the right operand is parsed with.
    pub fn rhs_precedence(&self) -> u8 {
        match self.associativity {
            Associativity::Left | Associativity::None => self.precedence + 1,
            Associativity::Right => self.precedence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Use,
    Include,
}

/// Node Types
///
/// Mirrors the variants of [`Node`] without their payload.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NodeType {
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    ArrayLiteral,
    VarDecl,
    FnPrototype,
    StructDecl,
    FnDef,
    Call,
    If,
    BinaryExpr,
    UnaryExpr,
    Return,
    Import,
    Module,
    Match,
    MatchArm,
}

/// A node of the syntax tree.
///
/// Every node exclusively owns its children. A bare identifier in expression
/// position is a `Call` with no arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    ArrayLiteral(NodeList),
    VarDecl {
        name: String,
        is_mutable: bool,
        initializer: Option<Box<Node>>,
    },
    FnPrototype {
        name: String,
        params: NodeList,
    },
    StructDecl {
        name: String,
        fields: NodeList,
    },
    FnDef {
        prototype: Box<Node>,
        body: NodeList,
    },
    Call {
        name: String,
        args: NodeList,
    },
    If {
        condition: Box<Node>,
        then_body: NodeList,
        else_body: Option<NodeList>,
    },
    BinaryExpr {
        operator: OperatorDescriptor,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    UnaryExpr {
        operator: OperatorDescriptor,
        operand: Box<Node>,
    },
    Return(Option<Box<Node>>),
    Import {
        kind: ImportKind,
        name: String,
    },
    Module {
        name: String,
        body: NodeList,
    },
    Match {
        subject: Box<Node>,
        arms: NodeList,
    },
    MatchArm {
        pattern: Box<Node>,
        body: NodeList,
    },
}

impl Node {
    pub fn int_literal(value: i64) -> Self {
        Node::IntLiteral(value)
    }

    pub fn float_literal(value: f64) -> Self {
        Node::FloatLiteral(value)
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        Node::StringLiteral(value.into())
    }

    pub fn array_literal(elements: NodeList) -> Self {
        Node::ArrayLiteral(elements)
    }

    pub fn var_decl(name: impl Into<String>, is_mutable: bool, initializer: Option<Node>) -> Self {
        Node::VarDecl {
            name: name.into(),
            is_mutable,
            initializer: initializer.map(Box::new),
        }
    }

    pub fn fn_prototype(name: impl Into<String>, params: NodeList) -> Self {
        Node::FnPrototype {
            name: name.into(),
            params,
        }
    }

    pub fn struct_decl(name: impl Into<String>, fields: NodeList) -> Self {
        Node::StructDecl {
            name: name.into(),
            fields,
        }
    }

    pub fn fn_def(prototype: Node, body: NodeList) -> Self {
        Node::FnDef {
            prototype: Box::new(prototype),
            body,
        }
    }

    pub fn call(name: impl Into<String>, args: NodeList) -> Self {
        Node::Call {
            name: name.into(),
            args,
        }
    }

    pub fn if_expr(condition: Node, then_body: NodeList, else_body: Option<NodeList>) -> Self {
        Node::If {
            condition: Box::new(condition),
            then_body,
            else_body,
        }
    }

    pub fn binary_expr(operator: OperatorDescriptor, lhs: Node, rhs: Node) -> Self {
        Node::BinaryExpr {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary_expr(operator: OperatorDescriptor, operand: Node) -> Self {
        Node::UnaryExpr {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn return_stmt(value: Option<Node>) -> Self {
        Node::Return(value.map(Box::new))
    }

    pub fn import(kind: ImportKind, name: impl Into<String>) -> Self {
        Node::Import {
            kind,
            name: name.into(),
        }
    }

    pub fn module(name: impl Into<String>, body: NodeList) -> Self {
        Node::Module {
            name: name.into(),
            body,
        }
    }

    pub fn match_expr(subject: Node, arms: NodeList) -> Self {
        Node::Match {
            subject: Box::new(subject),
            arms,
        }
    }

    pub fn match_arm(pattern: Node, body: NodeList) -> Self {
        Node::MatchArm {
            pattern: Box::new(pattern),
            body,
        }
    }

    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::IntLiteral(_) => NodeType::IntLiteral,
            Node::FloatLiteral(_) => NodeType::FloatLiteral,
            Node::StringLiteral(_) => NodeType::StringLiteral,
            Node::ArrayLiteral(_) => NodeType::ArrayLiteral,
            Node::VarDecl { .. } => NodeType::VarDecl,
            Node::FnPrototype { .. } => NodeType::FnPrototype,
            Node::StructDecl { .. } => NodeType::StructDecl,
            Node::FnDef { .. } => NodeType::FnDef,
            Node::Call { .. } => NodeType::Call,
            Node::If { .. } => NodeType::If,
            Node::BinaryExpr { .. } => NodeType::BinaryExpr,
            Node::UnaryExpr { .. } => NodeType::UnaryExpr,
            Node::Return(_) => NodeType::Return,
            Node::Import { .. } => NodeType::Import,
            Node::Module { .. } => NodeType::Module,
            Node::Match { .. } => NodeType::Match,
            Node::MatchArm { .. } => NodeType::MatchArm,
        }
    }

    /// Moves every owned child node out of `self`, leaving empty lists and
    /// placeholder leaves behind.
    ///
    /// This is the one structural walk `Drop` relies on: a variant whose
    /// children are not returned here would release them recursively instead.
    fn take_children(&mut self) -> Vec<Node> {
        match self {
            Node::IntLiteral(_)
            | Node::FloatLiteral(_)
            | Node::StringLiteral(_)
            | Node::Import { .. } => Vec::new(),
            Node::ArrayLiteral(elements) => elements.take(),
            Node::VarDecl { initializer, .. } => take_optional(initializer),
            Node::FnPrototype { params, .. } => params.take(),
            Node::StructDecl { fields, .. } => fields.take(),
            Node::FnDef { prototype, body } => {
                let mut children = body.take();
                children.push(take_boxed(prototype));
                children
            }
            Node::Call { args, .. } => args.take(),
            Node::If {
                condition,
                then_body,
                else_body,
            } => {
                let mut children = then_body.take();
                if let Some(else_body) = else_body {
                    children.append(&mut else_body.take());
                }
                children.push(take_boxed(condition));
                children
            }
            Node::BinaryExpr { lhs, rhs, .. } => vec![take_boxed(lhs), take_boxed(rhs)],
            Node::UnaryExpr { operand, .. } => vec![take_boxed(operand)],
            Node::Return(value) => take_optional(value),
            Node::Module { body, .. } => body.take(),
            Node::Match { subject, arms } => {
                let mut children = arms.take();
                children.push(take_boxed(subject));
                children
            }
            Node::MatchArm { pattern, body } => {
                let mut children = body.take();
                children.push(take_boxed(pattern));
                children
            }
        }
    }
}

fn take_boxed(node: &mut Box<Node>) -> Node {
    mem::replace(node.as_mut(), Node::IntLiteral(0))
}

fn take_optional(node: &mut Option<Box<Node>>) -> Vec<Node> {
    match node.take() {
        Some(node) => vec![*node],
        None => Vec::new(),
    }
}

// Releases the tree with an explicit work list so deeply nested input cannot
// overflow the stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = self.take_children();

        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.take_children());
        }
    }
}

/// Ordered sequence of nodes: a block, or an argument, parameter or field
/// list. Insertion order is significant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    pub fn new() -> Self {
        NodeList(Vec::new())
    }

    pub fn push(&mut self, node: Node) {
        self.0.push(node);
    }

    fn take(&mut self) -> Vec<Node> {
        mem::take(&mut self.0)
    }

    pub fn into_vec(self) -> Vec<Node> {
        self.0
    }
}

impl Deref for NodeList {
    type Target = [Node];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        NodeList(nodes)
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        NodeList(iter.into_iter().collect())
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
