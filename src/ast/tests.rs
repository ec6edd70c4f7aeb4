//! Unit tests for the AST module.
//!
//! Covers the constructors, the node type mirror, both renderings and
//! releasing trees far deeper than the call stack could recurse through.

use pretty_assertions::assert_eq;

use crate::lexer::tokens::TokenKind;

use super::{
    ast::{Associativity, ImportKind, Node, NodeList, NodeType, OperatorDescriptor},
    dump::dump_node_list,
};

const PLUS: OperatorDescriptor = OperatorDescriptor::binary(TokenKind::Plus, 11, Associativity::Left);
const STAR: OperatorDescriptor = OperatorDescriptor::binary(TokenKind::Star, 12, Associativity::Left);
const NOT: OperatorDescriptor = OperatorDescriptor::unary(TokenKind::Bang, 14);

fn ident(name: &str) -> Node {
    Node::call(name, NodeList::new())
}

fn list(nodes: Vec<Node>) -> NodeList {
    NodeList::from(nodes)
}

/// One node of every variant, nested where the variant has children.
fn every_variant() -> NodeList {
    let params = list(vec![
        Node::var_decl("a", false, None),
        Node::var_decl("b", false, None),
    ]);
    let body = list(vec![Node::return_stmt(Some(Node::binary_expr(
        PLUS,
        ident("a"),
        ident("b"),
    )))]);

    list(vec![
        Node::import(ImportKind::Use, "io"),
        Node::import(ImportKind::Include, "math"),
        Node::struct_decl(
            "Point",
            list(vec![
                Node::var_decl("x", false, Some(Node::int_literal(0))),
                Node::var_decl("y", true, None),
            ]),
        ),
        Node::module(
            "geometry",
            list(vec![Node::fn_def(Node::fn_prototype("add", params), body)]),
        ),
        Node::if_expr(
            Node::unary_expr(NOT, ident("done")),
            list(vec![Node::call("print", list(vec![Node::string_literal("hi")]))]),
            Some(list(vec![Node::return_stmt(None)])),
        ),
        Node::match_expr(
            ident("n"),
            list(vec![Node::match_arm(
                Node::float_literal(1.5),
                list(vec![Node::array_literal(list(vec![Node::int_literal(1)]))]),
            )]),
        ),
    ])
}

#[test]
fn test_node_types() {
    let cases = vec![
        (Node::int_literal(1), NodeType::IntLiteral),
        (Node::float_literal(1.0), NodeType::FloatLiteral),
        (Node::string_literal("s"), NodeType::StringLiteral),
        (Node::array_literal(NodeList::new()), NodeType::ArrayLiteral),
        (Node::var_decl("x", false, None), NodeType::VarDecl),
        (Node::fn_prototype("f", NodeList::new()), NodeType::FnPrototype),
        (Node::struct_decl("S", NodeList::new()), NodeType::StructDecl),
        (
            Node::fn_def(Node::fn_prototype("f", NodeList::new()), NodeList::new()),
            NodeType::FnDef,
        ),
        (ident("x"), NodeType::Call),
        (Node::if_expr(ident("c"), NodeList::new(), None), NodeType::If),
        (
            Node::binary_expr(PLUS, Node::int_literal(1), Node::int_literal(2)),
            NodeType::BinaryExpr,
        ),
        (Node::unary_expr(NOT, ident("x")), NodeType::UnaryExpr),
        (Node::return_stmt(None), NodeType::Return),
        (Node::import(ImportKind::Use, "io"), NodeType::Import),
        (Node::module("m", NodeList::new()), NodeType::Module),
        (Node::match_expr(ident("x"), NodeList::new()), NodeType::Match),
        (Node::match_arm(ident("x"), NodeList::new()), NodeType::MatchArm),
    ];

    for (node, expected) in cases {
        assert_eq!(node.get_node_type(), expected);
    }
}

#[test]
fn test_constructors_take_ownership() {
    let node = Node::var_decl("total", true, Some(Node::int_literal(3)));

    match &node {
        Node::VarDecl {
            name,
            is_mutable,
            initializer,
        } => {
            assert_eq!(name, "total");
            assert!(*is_mutable);
            assert_eq!(initializer.as_deref(), Some(&Node::int_literal(3)));
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_node_list_preserves_order() {
    let nodes: NodeList = (1..=4).map(Node::int_literal).collect();

    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[0], Node::int_literal(1));
    assert_eq!(nodes.last(), Some(&Node::int_literal(4)));
    assert_eq!(
        nodes.into_vec(),
        vec![
            Node::int_literal(1),
            Node::int_literal(2),
            Node::int_literal(3),
            Node::int_literal(4)
        ]
    );
}

#[test]
fn test_rhs_precedence() {
    let pow = OperatorDescriptor::binary(TokenKind::StarStar, 13, Associativity::Right);
    let eq = OperatorDescriptor::binary(TokenKind::EqEq, 5, Associativity::None);

    assert_eq!(PLUS.rhs_precedence(), 12);
    assert_eq!(pow.rhs_precedence(), 13);
    assert_eq!(eq.rhs_precedence(), 6);
    assert!(NOT.is_unary);
    assert!(!PLUS.is_unary);
}

#[test]
fn test_display_sexpr() {
    let expr = Node::binary_expr(
        PLUS,
        Node::int_literal(1),
        Node::binary_expr(STAR, Node::int_literal(2), Node::int_literal(3)),
    );
    assert_eq!(expr.to_string(), "(+ 1 (* 2 3))");

    let decl = Node::var_decl("x", true, Some(Node::float_literal(2.0)));
    assert_eq!(decl.to_string(), "(let mut x 2.0)");

    let call = Node::call("print", list(vec![Node::string_literal("a\"b"), ident("y")]));
    assert_eq!(call.to_string(), "(call print \"a\\\"b\" y)");

    assert_eq!(Node::return_stmt(None).to_string(), "(return)");
    assert_eq!(
        Node::import(ImportKind::Include, "std").to_string(),
        "(include std)"
    );
}

#[test]
fn test_display_node_list() {
    let expected = "(use io)\n\
        (include math)\n\
        (struct Point (let x 0) (let mut y))\n\
        (module geometry (fn (proto add (let a) (let b)) (return (+ a b))))\n\
        (if (! done) (then (call print \"hi\")) (else (return)))\n\
        (match n (=> 1.5 (array 1)))";

    assert_eq!(every_variant().to_string(), expected);
}

#[test]
fn test_dump_simple_tree() {
    let nodes = list(vec![Node::var_decl(
        "x",
        false,
        Some(Node::binary_expr(PLUS, Node::int_literal(1), ident("y"))),
    )]);

    let expected = "\
variable: x (immutable)
  binary: +
    int: 1
    call: y
";

    assert_eq!(dump_node_list(&nodes), expected);
}

#[test]
fn test_dump_every_variant() {
    let expected = "\
use: io
include: math
struct: Point
  fields:
    variable: x (immutable)
      int: 0
    variable: y (mutable)
module: geometry
  body:
    function:
      proto: add
        params:
          variable: a (immutable)
          variable: b (immutable)
      body:
        return:
          binary: +
            call: a
            call: b
if:
  condition:
    unary: !
      call: done
  then:
    call: print
      args:
        string: \"hi\"
  else:
    return:
match:
  subject:
    call: n
  arms:
    arm:
      pattern:
        float: 1.5
      body:
        array:
          elements:
            int: 1
";

    assert_eq!(dump_node_list(&every_variant()), expected);
}

#[test]
fn test_dump_empty_lists() {
    let nodes = list(vec![Node::fn_def(
        Node::fn_prototype("noop", NodeList::new()),
        NodeList::new(),
    )]);

    let expected = "\
function:
  proto: noop
    params: (empty)
  body: (empty)
";

    assert_eq!(dump_node_list(&nodes), expected);
    assert_eq!(dump_node_list(&NodeList::new()), "");
}

#[test]
fn test_drop_deep_unary_chain() {
    let mut node = ident("x");
    for _ in 0..200_000 {
        node = Node::unary_expr(NOT, node);
    }

    drop(node);
}

#[test]
fn test_drop_deep_binary_chain() {
    let mut node = Node::int_literal(0);
    for i in 0..200_000 {
        node = Node::binary_expr(PLUS, node, Node::int_literal(i));
    }

    drop(node);
}

#[test]
fn test_drop_deep_else_chain() {
    let mut node = Node::if_expr(ident("c"), NodeList::new(), None);
    for _ in 0..100_000 {
        node = Node::if_expr(ident("c"), NodeList::new(), Some(list(vec![node])));
    }

    drop(node);
}

#[test]
fn test_render_deep_left_chain() {
    let mut node = Node::int_literal(0);
    for i in 1..100_000 {
        node = Node::binary_expr(PLUS, node, Node::int_literal(i));
    }
    let nodes = list(vec![node]);

    let dump = dump_node_list(&nodes);
    assert_eq!(dump.lines().count(), 199_999);
    assert!(dump.ends_with("\n  int: 99999\n"));

    let rendered = nodes.to_string();
    assert!(rendered.starts_with("(+ (+ (+ "));
    assert!(rendered.ends_with(" 99998) 99999)"));
}

#[test]
fn test_render_deep_unary_chain() {
    let mut node = ident("x");
    for _ in 0..100_000 {
        node = Node::unary_expr(NOT, node);
    }

    assert_eq!(node.to_string().len(), "(! )".len() * 100_000 + 1);
}
