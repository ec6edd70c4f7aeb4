use crate::{
    ast::ast::{ImportKind, Node, NodeList},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expression, lookups::LOGICAL_NOT, parser::Parser};

/// Parses statements until `terminator` or `EOF`, leaving it unconsumed.
///
/// Every failure is reported here and parsing resumes at the next statement,
/// so this never fails. New lines and `;` between statements are skipped.
pub fn parse_stmt_list(parser: &mut Parser, terminator: TokenKind) -> NodeList {
    let mut body = NodeList::new();
    let mut returned = false;
    let mut warned = false;

    while !parser.at(terminator) && parser.has_tokens() {
        if matches!(
            parser.current_token_kind(),
            TokenKind::NewLine | TokenKind::SemiColon
        ) {
            parser.advance();
            parser.recovering = false;
            continue;
        }

        let start = parser.cursor();
        let line = parser.current_token().line;

        match parse_terminated_stmt(parser) {
            Ok(node) => {
                parser.recovering = false;

                if returned && !warned {
                    let position = parser.position_at_line(line);
                    parser.report(Error::new(ErrorImpl::UnreachableCode, position));
                    warned = true;
                }

                returned |= matches!(node, Node::Return(_));
                body.push(node);
            }
            Err(error) => recover(parser, error, start),
        }
    }

    body
}

/// A failure that consumed nothing is a bad statement start: report it unless
/// one was just reported, then step over exactly one token. Anything else is
/// always reported and skipped up to the next statement boundary.
///
/// Either way bad statement starts stay quiet until a boundary is crossed.
fn recover(parser: &mut Parser, error: Error, start: usize) {
    if parser.cursor() == start {
        if !parser.recovering {
            parser.report(error);
        }
        parser.advance();
    } else {
        parser.report(error);
        parser.synchronize();
    }

    parser.recovering = true;
}

fn parse_terminated_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let node = parse_stmt(parser)?;
    parser.expect_statement_end()?;

    Ok(node)
}

/// Dispatches on the token that starts the statement. Blocks and bodies come
/// back through here, so every level of statement nesting is counted.
pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.nested(dispatch_stmt)
}

fn dispatch_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let kind = parser.current_token_kind();

    if let Some(handler) = parser.stmt_handler(kind) {
        return handler(parser);
    }

    if parser.nud_handler(kind).is_some() {
        return parse_expression(parser);
    }

    Err(parser.error(ErrorImpl::UnexpectedToken {
        token: parser.current_token().describe(),
    }))
}

/// `name name ... =>` defines a function, `name =` binds a value, anything
/// else starting with a name is an expression.
pub fn parse_ident_stmt(parser: &mut Parser) -> Result<Node, Error> {
    match parser.peek_kind(1) {
        TokenKind::Ident | TokenKind::FatArrow => parse_fn_def(parser),
        TokenKind::Eq => parse_var_decl_stmt(parser),
        _ => parse_expression(parser),
    }
}

pub fn parse_fn_def(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.expect(TokenKind::Ident)?.value;

    let mut params = NodeList::new();
    while parser.at(TokenKind::Ident) {
        let param = parser.advance().value;
        params.push(Node::var_decl(param, false, None));
    }

    parser.expect(TokenKind::FatArrow)?;
    let body = parse_body(parser)?;

    Ok(Node::fn_def(Node::fn_prototype(name, params), body))
}

/// A `{ }` block, or a single statement on the same or the next line.
pub fn parse_body(parser: &mut Parser) -> Result<NodeList, Error> {
    parser.skip_newlines();

    if parser.at(TokenKind::LBrace) {
        return parse_block(parser);
    }

    let stmt = parse_stmt(parser)?;
    Ok(NodeList::from(vec![stmt]))
}

pub fn parse_block(parser: &mut Parser) -> Result<NodeList, Error> {
    parser.skip_newlines();
    parser.expect(TokenKind::LBrace)?;

    let body = parse_stmt_list(parser, TokenKind::RBrace);

    parser.expect(TokenKind::RBrace)?;

    Ok(body)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let is_mutable = parser.at(TokenKind::Mut);
    if is_mutable {
        parser.advance();
    }

    let name = parser.expect(TokenKind::Ident)?.value;
    parser.expect(TokenKind::Eq)?;
    parser.skip_newlines();

    let initializer = parse_expression(parser)?;

    Ok(Node::var_decl(name, is_mutable, Some(initializer)))
}

/// `if`/`unless` with an optional `else` chain. An `else if` becomes the sole
/// node of the outer `else` body.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let keyword = parser.advance();

    let condition = parse_expression(parser)?;
    let condition = match keyword.kind {
        TokenKind::Unless => Node::unary_expr(LOGICAL_NOT, condition),
        _ => condition,
    };

    let then_body = parse_block(parser)?;

    if parser.peek_past_newlines() != TokenKind::Else {
        return Ok(Node::if_expr(condition, then_body, None));
    }

    parser.skip_newlines();
    parser.advance();

    let else_body = match parser.current_token_kind() {
        TokenKind::If | TokenKind::Unless => {
            NodeList::from(vec![parser.nested(parse_if_stmt)?])
        }
        _ => parse_block(parser)?,
    };

    Ok(Node::if_expr(condition, then_body, Some(else_body)))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let kind = match parser.advance().kind {
        TokenKind::Use => ImportKind::Use,
        _ => ImportKind::Include,
    };

    let name = parser.expect(TokenKind::Ident)?.value;

    Ok(Node::import(kind, name))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::Return)?;

    if parser.current_token_kind().is_statement_end() {
        return Ok(Node::return_stmt(None));
    }

    let value = parse_expression(parser)?;
    Ok(Node::return_stmt(Some(value)))
}

fn skip_separators(parser: &mut Parser) {
    while matches!(
        parser.current_token_kind(),
        TokenKind::NewLine | TokenKind::Comma
    ) {
        parser.advance();
    }
}

/// Entries of a struct or match body end at a new line, a comma or the `}`.
fn expect_separator(parser: &Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::NewLine | TokenKind::Comma | TokenKind::RBrace => Ok(()),
        _ => Err(parser.error(ErrorImpl::ExpectedToken {
            expected: String::from("',' or new line"),
            found: parser.current_token().describe(),
        })),
    }
}

pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::Struct)?;
    let name = parser.expect(TokenKind::Ident)?.value;

    parser.skip_newlines();
    parser.expect(TokenKind::LBrace)?;

    let mut fields = NodeList::new();

    loop {
        skip_separators(parser);
        if parser.at(TokenKind::RBrace) {
            break;
        }

        let is_mutable = parser.at(TokenKind::Mut);
        if is_mutable {
            parser.advance();
        }

        let field = parser.expect(TokenKind::Ident)?.value;
        let default = if parser.at(TokenKind::Eq) {
            parser.advance();
            Some(parse_expression(parser)?)
        } else {
            None
        };

        fields.push(Node::var_decl(field, is_mutable, default));
        expect_separator(parser)?;
    }

    parser.expect(TokenKind::RBrace)?;

    Ok(Node::struct_decl(name, fields))
}

pub fn parse_module_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::Module)?;
    let name = parser.expect(TokenKind::Ident)?.value;

    let body = parse_block(parser)?;

    Ok(Node::module(name, body))
}

pub fn parse_match_stmt(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::Match)?;
    let subject = parse_expression(parser)?;

    parser.skip_newlines();
    parser.expect(TokenKind::LBrace)?;

    let mut arms = NodeList::new();

    loop {
        skip_separators(parser);
        if parser.at(TokenKind::RBrace) {
            break;
        }

        let pattern = parse_expression(parser)?;
        parser.expect(TokenKind::FatArrow)?;
        let body = parse_body(parser)?;

        arms.push(Node::match_arm(pattern, body));
        expect_separator(parser)?;
    }

    parser.expect(TokenKind::RBrace)?;

    Ok(Node::match_expr(subject, arms))
}
