use crate::{
    ast::ast::{Associativity, Node, NodeList},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    lookups::{binary_operator, unary_operator, LOWEST_PRECEDENCE},
    parser::Parser,
};

pub fn parse_expression(parser: &mut Parser) -> Result<Node, Error> {
    parse_expr(parser, LOWEST_PRECEDENCE)
}

/// Precedence climber.
///
/// Folds binary operators into the left operand for as long as the next
/// operator binds at least as tightly as `min_precedence`. Two operators of
/// one non-associative level in a row are rejected.
pub fn parse_expr(parser: &mut Parser, min_precedence: u8) -> Result<Node, Error> {
    parser.nested(|parser| climb(parser, min_precedence))
}

fn climb(parser: &mut Parser, min_precedence: u8) -> Result<Node, Error> {
    let mut left = parse_nud(parser)?;
    let mut chained_level = None;

    loop {
        if parser.in_brackets() {
            parser.skip_newlines();
        }

        let operator = match binary_operator(parser.current_token_kind()) {
            Some(operator) if operator.precedence >= min_precedence => operator,
            _ => break,
        };

        if chained_level == Some(operator.precedence) {
            return Err(parser.error(ErrorImpl::NonAssociativeChain {
                operator: operator.symbol.to_string(),
            }));
        }

        parser.advance();
        // an operator at the end of a line continues onto the next one
        parser.skip_newlines();

        let right = parse_expr(parser, operator.rhs_precedence())?;

        chained_level = match operator.associativity {
            Associativity::None => Some(operator.precedence),
            Associativity::Left | Associativity::Right => None,
        };
        left = Node::binary_expr(operator, left, right);
    }

    Ok(left)
}

fn parse_nud(parser: &mut Parser) -> Result<Node, Error> {
    match parser.nud_handler(parser.current_token_kind()) {
        Some(handler) => handler(parser),
        None => Err(expected_expression(parser)),
    }
}

fn expected_expression(parser: &Parser) -> Error {
    parser.error(ErrorImpl::ExpectedToken {
        expected: String::from("expression"),
        found: parser.current_token().describe(),
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.current_token();

    let node = match token.kind {
        TokenKind::Int => match token.value.parse::<i64>() {
            Ok(value) => Node::int_literal(value),
            Err(_) => {
                return Err(parser.error(ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                }))
            }
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Node::float_literal(value),
            Err(_) => {
                return Err(parser.error(ErrorImpl::FloatParseError {
                    token: token.value.clone(),
                }))
            }
        },
        TokenKind::String => Node::string_literal(unescape_string(&token.value)),
        _ => return Err(expected_expression(parser)),
    };

    parser.advance();
    Ok(node)
}

/// A name on its own, or a call when `(` directly follows it.
pub fn parse_ident_expr(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.expect(TokenKind::Ident)?;

    let is_call =
        parser.at(TokenKind::LParen) && parser.current_token().span.start == name.span.end;
    if !is_call {
        return Ok(Node::call(name.value, NodeList::new()));
    }

    let args = parse_expr_list(parser, TokenKind::RParen)?;
    Ok(Node::call(name.value, args))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Node, Error> {
    let operator = match unary_operator(parser.current_token_kind()) {
        Some(operator) => operator,
        None => return Err(expected_expression(parser)),
    };
    parser.advance();

    let operand = parse_expr(parser, operator.precedence)?;

    Ok(Node::unary_expr(operator, operand))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::LParen)?;

    parser.bracketed(|parser| {
        parser.skip_newlines();
        let expr = parse_expression(parser)?;
        parser.skip_newlines();

        parser.expect(TokenKind::RParen)?;
        Ok(expr)
    })
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Node, Error> {
    let elements = parse_expr_list(parser, TokenKind::RBracket)?;

    Ok(Node::array_literal(elements))
}

/// Comma separated expressions between the current opening token and
/// `close`. New lines are free inside; a trailing comma is allowed.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<NodeList, Error> {
    parser.advance();

    parser.bracketed(|parser| {
        parser.skip_newlines();
        let mut nodes = NodeList::new();

        while !parser.at(close) {
            nodes.push(parse_expression(parser)?);
            parser.skip_newlines();

            if !parser.at(close) {
                parser.expect(TokenKind::Comma)?;
                parser.skip_newlines();
            }
        }

        parser.expect(close)?;
        Ok(nodes)
    })
}

/// Strips the quotes off a string lexeme and resolves its escapes.
///
/// `\n`, `\t`, `\r` and `\0` map to their control characters; a backslash
/// before anything else yields that character unchanged.
pub fn unescape_string(lexeme: &str) -> String {
    let mut chars = lexeme.chars();
    let inner = match chars.next() {
        Some(quote) => chars.as_str().strip_suffix(quote).unwrap_or(chars.as_str()),
        None => "",
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
