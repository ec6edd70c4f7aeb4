use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Associativity, Node, OperatorDescriptor},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Threshold the climber starts every expression with.
pub const LOWEST_PRECEDENCE: u8 = 0;
/// Binds tighter than any binary operator.
pub const UNARY_PRECEDENCE: u8 = 14;

/// `!`, also the implicit negation of an `unless` condition.
pub const LOGICAL_NOT: OperatorDescriptor =
    OperatorDescriptor::unary(TokenKind::Bang, UNARY_PRECEDENCE);

lazy_static! {
    pub static ref BINARY_OPERATORS: HashMap<TokenKind, OperatorDescriptor> = {
        use Associativity::*;
        use TokenKind::*;

        let table = [
            (PlusEq, 1, Right),
            (MinEq, 1, Right),
            (StarEq, 1, Right),
            (SlashEq, 1, Right),
            (ModEq, 1, Right),
            (StarStarEq, 1, Right),
            (BAndEq, 1, Right),
            (BOrEq, 1, Right),
            (BXorEq, 1, Right),
            (LShiftEq, 1, Right),
            (RShiftEq, 1, Right),
            (Pipe, 2, Left),
            (Or, 3, Left),
            (And, 4, Left),
            (EqEq, 5, None),
            (BangEq, 5, None),
            (Lt, 6, None),
            (LtEq, 6, None),
            (Gt, 6, None),
            (GtEq, 6, None),
            (BOr, 7, Left),
            (BXor, 8, Left),
            (BAnd, 9, Left),
            (LShift, 10, Left),
            (RShift, 10, Left),
            (Plus, 11, Left),
            (Min, 11, Left),
            (Star, 12, Left),
            (Slash, 12, Left),
            (Mod, 12, Left),
            (StarStar, 13, Right),
        ];

        table
            .into_iter()
            .map(|(kind, precedence, associativity)| {
                (kind, OperatorDescriptor::binary(kind, precedence, associativity))
            })
            .collect()
    };

    pub static ref UNARY_OPERATORS: HashMap<TokenKind, OperatorDescriptor> = [
        TokenKind::Min,
        TokenKind::Bang,
        TokenKind::BNot,
    ]
    .into_iter()
    .map(|kind| (kind, OperatorDescriptor::unary(kind, UNARY_PRECEDENCE)))
    .collect();
}

pub fn binary_operator(kind: TokenKind) -> Option<OperatorDescriptor> {
    BINARY_OPERATORS.get(&kind).copied()
}

pub fn unary_operator(kind: TokenKind) -> Option<OperatorDescriptor> {
    UNARY_OPERATORS.get(&kind).copied()
}

pub type StmtHandler = fn(&mut Parser) -> Result<Node, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Node, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Literals and symbols
    parser.nud(TokenKind::Int, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Ident, parse_ident_expr);
    parser.nud(TokenKind::LParen, parse_grouping_expr);
    parser.nud(TokenKind::LBracket, parse_array_expr);

    // Prefix
    parser.nud(TokenKind::Min, parse_prefix_expr);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::BNot, parse_prefix_expr);

    // Statements
    parser.stmt(TokenKind::Ident, parse_ident_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Unless, parse_if_stmt);
    parser.stmt(TokenKind::Use, parse_import_stmt);
    parser.stmt(TokenKind::Include, parse_import_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Mut, parse_var_decl_stmt);
    parser.stmt(TokenKind::Struct, parse_struct_decl_stmt);
    parser.stmt(TokenKind::Module, parse_module_stmt);
    parser.stmt(TokenKind::Match, parse_match_stmt);
}

// Lookup tables inside parser struct, so independent parsers never share them
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
