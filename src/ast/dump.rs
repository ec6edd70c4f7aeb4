//! Human-readable renderings of the syntax tree.
//!
//! `dump_node_list` produces the indented tree the driver prints for `--ast`.
//! The `Display` impl on [`Node`] is a compact s-expression, handy in tests
//! and log lines.

use std::fmt::{self, Display, Write};

use super::ast::{ImportKind, Node, NodeList};

const INDENT: &str = "  ";

pub fn dump_node_list(list: &NodeList) -> String {
    let mut out = String::new();

    for node in list {
        dump_node(node, 0, &mut out);
    }

    out
}

fn line(out: &mut String, depth: usize, text: impl Display) {
    // writing into a String cannot fail
    let _ = writeln!(out, "{}{}", INDENT.repeat(depth), text);
}

/// Pending work of a dump, consumed from the back.
enum Entry<'a> {
    Node(&'a Node, usize),
    List(&'static str, &'a NodeList, usize),
    Label(&'static str, usize),
}

/// Appends `node` and its subtree at `depth`.
///
/// Walks an explicit stack, so trees deeper than the call stack (a long
/// left-leaning operator chain, say) dump like any other.
pub fn dump_node(node: &Node, depth: usize, out: &mut String) {
    let mut pending = vec![Entry::Node(node, depth)];

    while let Some(entry) = pending.pop() {
        match entry {
            Entry::Label(text, depth) => line(out, depth, text),
            Entry::List(label, list, depth) => {
                if list.is_empty() {
                    line(out, depth, format_args!("{}: (empty)", label));
                    continue;
                }

                line(out, depth, format_args!("{}:", label));
                pending.extend(list.iter().rev().map(|node| Entry::Node(node, depth + 1)));
            }
            Entry::Node(node, depth) => dump_entry(node, depth, out, &mut pending),
        }
    }
}

/// Writes the line for `node` itself and queues its children in order.
fn dump_entry<'a>(node: &'a Node, depth: usize, out: &mut String, pending: &mut Vec<Entry<'a>>) {
    let mut children = Vec::new();

    match node {
        Node::IntLiteral(value) => line(out, depth, format_args!("int: {}", value)),
        Node::FloatLiteral(value) => line(out, depth, format_args!("float: {}", value)),
        Node::StringLiteral(value) => line(out, depth, format_args!("string: {:?}", value)),
        Node::ArrayLiteral(elements) => {
            line(out, depth, "array:");
            children.push(Entry::List("elements", elements, depth + 1));
        }
        Node::VarDecl {
            name,
            is_mutable,
            initializer,
        } => {
            let mutability = if *is_mutable { "mutable" } else { "immutable" };
            line(out, depth, format_args!("variable: {} ({})", name, mutability));
            if let Some(initializer) = initializer {
                children.push(Entry::Node(initializer, depth + 1));
            }
        }
        Node::FnPrototype { name, params } => {
            line(out, depth, format_args!("proto: {}", name));
            children.push(Entry::List("params", params, depth + 1));
        }
        Node::StructDecl { name, fields } => {
            line(out, depth, format_args!("struct: {}", name));
            children.push(Entry::List("fields", fields, depth + 1));
        }
        Node::FnDef { prototype, body } => {
            line(out, depth, "function:");
            children.push(Entry::Node(prototype, depth + 1));
            children.push(Entry::List("body", body, depth + 1));
        }
        Node::Call { name, args } => {
            line(out, depth, format_args!("call: {}", name));
            if !args.is_empty() {
                children.push(Entry::List("args", args, depth + 1));
            }
        }
        Node::If {
            condition,
            then_body,
            else_body,
        } => {
            line(out, depth, "if:");
            children.push(Entry::Label("condition:", depth + 1));
            children.push(Entry::Node(condition, depth + 2));
            children.push(Entry::List("then", then_body, depth + 1));
            if let Some(else_body) = else_body {
                children.push(Entry::List("else", else_body, depth + 1));
            }
        }
        Node::BinaryExpr { operator, lhs, rhs } => {
            line(out, depth, format_args!("binary: {}", operator.symbol));
            children.push(Entry::Node(lhs, depth + 1));
            children.push(Entry::Node(rhs, depth + 1));
        }
        Node::UnaryExpr { operator, operand } => {
            line(out, depth, format_args!("unary: {}", operator.symbol));
            children.push(Entry::Node(operand, depth + 1));
        }
        Node::Return(value) => {
            line(out, depth, "return:");
            if let Some(value) = value {
                children.push(Entry::Node(value, depth + 1));
            }
        }
        Node::Import { kind, name } => line(out, depth, format_args!("{}: {}", kind, name)),
        Node::Module { name, body } => {
            line(out, depth, format_args!("module: {}", name));
            children.push(Entry::List("body", body, depth + 1));
        }
        Node::Match { subject, arms } => {
            line(out, depth, "match:");
            children.push(Entry::Label("subject:", depth + 1));
            children.push(Entry::Node(subject, depth + 2));
            children.push(Entry::List("arms", arms, depth + 1));
        }
        Node::MatchArm { pattern, body } => {
            line(out, depth, "arm:");
            children.push(Entry::Label("pattern:", depth + 1));
            children.push(Entry::Node(pattern, depth + 2));
            children.push(Entry::List("body", body, depth + 1));
        }
    }

    pending.extend(children.into_iter().rev());
}

impl Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportKind::Use => write!(f, "use"),
            ImportKind::Include => write!(f, "include"),
        }
    }
}

impl Display for NodeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// Pending output of a `Display` walk, consumed from the back.
enum Piece<'a> {
    Node(&'a Node),
    Text(&'static str),
    /// Every node of the list, each preceded by a space
    List(&'a NodeList),
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::List(list) => {
                    for node in list.iter().rev() {
                        pending.push(Piece::Node(node));
                        pending.push(Piece::Text(" "));
                    }
                }
                Piece::Node(node) => write_piece(f, node, &mut pending)?,
            }
        }

        Ok(())
    }
}

/// Writes the head of `node` and queues the rest of its s-expression.
fn write_piece<'a>(
    f: &mut fmt::Formatter<'_>,
    node: &'a Node,
    pending: &mut Vec<Piece<'a>>,
) -> fmt::Result {
    let mut rest = Vec::new();

    match node {
        Node::IntLiteral(value) => write!(f, "{}", value)?,
        Node::FloatLiteral(value) => write!(f, "{:?}", value)?,
        Node::StringLiteral(value) => write!(f, "{:?}", value)?,
        Node::ArrayLiteral(elements) => {
            write!(f, "(array")?;
            rest.extend([Piece::List(elements), Piece::Text(")")]);
        }
        Node::VarDecl {
            name,
            is_mutable,
            initializer,
        } => {
            write!(f, "(let ")?;
            if *is_mutable {
                write!(f, "mut ")?;
            }
            write!(f, "{}", name)?;
            if let Some(initializer) = initializer {
                rest.extend([Piece::Text(" "), Piece::Node(initializer)]);
            }
            rest.push(Piece::Text(")"));
        }
        Node::FnPrototype { name, params } => {
            write!(f, "(proto {}", name)?;
            rest.extend([Piece::List(params), Piece::Text(")")]);
        }
        Node::StructDecl { name, fields } => {
            write!(f, "(struct {}", name)?;
            rest.extend([Piece::List(fields), Piece::Text(")")]);
        }
        Node::FnDef { prototype, body } => {
            write!(f, "(fn ")?;
            rest.extend([Piece::Node(prototype), Piece::List(body), Piece::Text(")")]);
        }
        Node::Call { name, args } => {
            if args.is_empty() {
                return write!(f, "{}", name);
            }
            write!(f, "(call {}", name)?;
            rest.extend([Piece::List(args), Piece::Text(")")]);
        }
        Node::If {
            condition,
            then_body,
            else_body,
        } => {
            write!(f, "(if ")?;
            rest.extend([
                Piece::Node(condition),
                Piece::Text(" (then"),
                Piece::List(then_body),
                Piece::Text(")"),
            ]);
            if let Some(else_body) = else_body {
                rest.extend([Piece::Text(" (else"), Piece::List(else_body), Piece::Text(")")]);
            }
            rest.push(Piece::Text(")"));
        }
        Node::BinaryExpr { operator, lhs, rhs } => {
            write!(f, "({} ", operator.symbol)?;
            rest.extend([
                Piece::Node(lhs),
                Piece::Text(" "),
                Piece::Node(rhs),
                Piece::Text(")"),
            ]);
        }
        Node::UnaryExpr { operator, operand } => {
            write!(f, "({} ", operator.symbol)?;
            rest.extend([Piece::Node(operand), Piece::Text(")")]);
        }
        Node::Return(value) => match value {
            Some(value) => {
                write!(f, "(return ")?;
                rest.extend([Piece::Node(value), Piece::Text(")")]);
            }
            None => write!(f, "(return)")?,
        },
        Node::Import { kind, name } => write!(f, "({} {})", kind, name)?,
        Node::Module { name, body } => {
            write!(f, "(module {}", name)?;
            rest.extend([Piece::List(body), Piece::Text(")")]);
        }
        Node::Match { subject, arms } => {
            write!(f, "(match ")?;
            rest.extend([Piece::Node(subject), Piece::List(arms), Piece::Text(")")]);
        }
        Node::MatchArm { pattern, body } => {
            write!(f, "(=> ")?;
            rest.extend([Piece::Node(pattern), Piece::List(body), Piece::Text(")")]);
        }
    }

    pending.extend(rest.into_iter().rev());
    Ok(())
}
