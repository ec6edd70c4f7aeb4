//! Parser module for building the syntax tree.
//!
//! This module contains the parser that transforms a token stream into the
//! ordered list of top-level nodes. Statements are dispatched on the token
//! that starts them and expressions go through a precedence climber driven
//! by static operator descriptors. It handles:
//!
//! - Function definitions, variable bindings, imports and `return`
//! - `if`/`unless` chains, `struct`, `module` and `match` bodies
//! - Binary and unary operators with precedence and associativity
//! - Error recovery, so one run reports every independent problem
//!
//! NUD (null denotation) handlers start an expression; binary operators are
//! folded by `expr::parse_expr` using the descriptors in `lookups`.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
