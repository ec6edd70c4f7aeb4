//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Statements are dispatched through a lookup table keyed by the token that
//! starts them; expressions start through a second table of null denotation
//! (prefix) handlers and continue in the precedence climber in `expr`.
//!
//! The parser never stops at the first problem. Each failure is recorded in
//! its `Diagnostics` and the cursor is moved past the offending input, so one
//! run reports as much as possible and always reaches `EOF`.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::NodeList,
    config::Config,
    errors::errors::{Diagnostics, Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, TokenStream},
    Position, Span, LOG_VERBOSE,
};

use super::{
    lookups::{create_token_lookups, NUDHandler, NUDLookup, StmtHandler, StmtLookup},
    stmt::parse_stmt_list,
};

/// Deepest nesting of statements and expressions the parser descends into.
/// Anything deeper is reported as `NestingTooDeep` instead of exhausting the
/// stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token stream, always ending in `EOF`
    tokens: Vec<Token>,
    /// Index of the current token, never past the trailing `EOF`
    pos: usize,
    /// Label attached to every diagnostic
    label: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    diagnostics: Diagnostics,
    /// Set after an unexpected statement start was reported; further ones are
    /// swallowed until the next statement boundary.
    pub(crate) recovering: bool,
    /// Statements and expressions currently being parsed, innermost last
    depth: usize,
    /// Open `(` and `[` around the cursor
    brackets: usize,
}

impl Parser {
    pub fn new(tokens: TokenStream, label: Rc<String>) -> Self {
        let mut tokens = tokens.into_vec();

        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let (line, end) = tokens
                .last()
                .map(|token| (token.line, token.span.end))
                .unwrap_or((1, 0));

            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::new(),
                line,
                span: Span::new(end, end),
            });
        }

        Parser {
            tokens,
            pos: 0,
            label,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            diagnostics: Diagnostics::new(),
            recovering: false,
            depth: 0,
            brackets: 0,
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token `offset` places ahead, `EOF` past the end.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Kind of the first token from the cursor on that is not a new line.
    pub fn peek_past_newlines(&self) -> TokenKind {
        self.tokens[self.pos..]
            .iter()
            .find(|token| token.kind != TokenKind::NewLine)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Moves to the next token and returns the one moved over. Stays on `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();

        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }

        token
    }

    pub fn cursor(&self) -> usize {
        self.pos
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current_token_kind() == kind
    }

    /// Consumes the current token if it has the expected kind.
    ///
    /// `expected` is how the missing token is named in the diagnostic.
    pub fn expect_error(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.at(expected_kind) {
            Ok(self.advance())
        } else {
            Err(self.error(ErrorImpl::ExpectedToken {
                expected: expected.to_string(),
                found: self.current_token().describe(),
            }))
        }
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let expected = match expected_kind {
            TokenKind::Ident => String::from("identifier"),
            kind => format!("'{}'", kind),
        };

        self.expect_error(expected_kind, &expected)
    }

    /// Fails unless the current token ends a statement. Nothing is consumed.
    pub fn expect_statement_end(&self) -> Result<(), Error> {
        if self.current_token_kind().is_statement_end() {
            Ok(())
        } else {
            Err(self.error(ErrorImpl::ExpectedStatementEnd {
                found: self.current_token().describe(),
            }))
        }
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn skip_newlines(&mut self) {
        while self.at(TokenKind::NewLine) {
            self.advance();
        }
    }

    /// Skips to the next statement boundary without consuming it.
    pub fn synchronize(&mut self) {
        while !matches!(
            self.current_token_kind(),
            TokenKind::NewLine | TokenKind::SemiColon | TokenKind::RBrace | TokenKind::EOF
        ) {
            self.advance();
        }
    }

    /// Runs `parse` one nesting level deeper, failing once the level passes
    /// `MAX_NESTING_DEPTH`.
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;

        result
    }

    /// Runs `parse` inside a `( )` or `[ ]` pair, where new lines are free.
    pub fn bracketed<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.brackets += 1;
        let result = parse(self);
        self.brackets -= 1;

        result
    }

    pub fn in_brackets(&self) -> bool {
        self.brackets > 0
    }

    pub fn stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    pub fn nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Position of the current token.
    pub fn get_position(&self) -> Position {
        Position(Some(self.current_token().line), Rc::clone(&self.label))
    }

    pub fn position_at_line(&self, line: usize) -> Position {
        Position(Some(line), Rc::clone(&self.label))
    }

    /// Builds a diagnostic pointing at the current token.
    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.get_position())
    }

    pub fn report(&mut self, error: Error) {
        self.diagnostics.push(error);
    }

    pub fn get_diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Parses a stream of tokens into the list of top-level nodes.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes the lookup tables, and parses statements until EOF. The
/// returned diagnostics have `failed()` set if anything at error severity
/// was reported; the node list holds every statement that parsed cleanly.
pub fn parse(tokens: TokenStream, config: &Config) -> (NodeList, Diagnostics) {
    LOG_VERBOSE!(config, "starting syntax analysis of {}", config.label);

    let mut parser = Parser::new(tokens, Rc::clone(&config.label));
    create_token_lookups(&mut parser);

    let body = parse_stmt_list(&mut parser, TokenKind::EOF);
    let diagnostics = parser.into_diagnostics();

    LOG_VERBOSE!(
        config,
        "parsed {} top-level nodes from {} with {} errors and {} warnings",
        body.len(),
        config.label,
        diagnostics.error_count(),
        diagnostics.warning_count()
    );

    (body, diagnostics)
}
