use crate::{
    config::Config,
    errors::errors::{Diagnostics, Error, ErrorImpl},
    Position, Span, LOG_VERBOSE, MK_TOKEN,
};

use super::tokens::{lookup_keyword, Token, TokenKind, TokenStream};

/// Cursor-based, single pass scanner with one character of lookahead.
///
/// `start` marks the first byte of the token being scanned, `pos` the next
/// unread byte. Both are byte offsets into `source`.
pub struct Lexer<'a> {
    source: &'a str,
    config: &'a Config,
    tokens: TokenStream,
    diagnostics: Diagnostics,
    start: usize,
    start_line: usize,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: &'a Config) -> Lexer<'a> {
        Lexer {
            source,
            config,
            tokens: TokenStream::new(),
            diagnostics: Diagnostics::new(),
            start: 0,
            start_line: 1,
            pos: 0,
            line: 1,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    pub fn eat(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.eat();
            true
        } else {
            false
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn begin_token(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
    }

    fn current_text(&self) -> &'a str {
        &self.source[self.start..self.pos]
    }

    fn position(&self, line: usize) -> Position {
        Position(Some(line), self.config.label.clone())
    }

    fn emit(&mut self, kind: TokenKind) {
        self.tokens.push(MK_TOKEN!(
            kind,
            String::from(self.current_text()),
            self.start_line,
            Span::new(self.start, self.pos)
        ));
    }

    /// Emits `compound` when the next character is `=`, `simple` otherwise.
    fn switch_eq(&mut self, simple: TokenKind, compound: TokenKind) {
        if self.eat_if('=') {
            self.emit(compound);
        } else {
            self.emit(simple);
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.eat();
        }
    }

    /// Consumes a `%%` comment through the end of the line, newline included.
    fn read_comment(&mut self) {
        while let Some(c) = self.eat() {
            if c == '\n' {
                self.line += 1;
                break;
            }
        }
    }

    fn read_number(&mut self) {
        let mut kind = if self.current_text() == "." {
            TokenKind::Float
        } else {
            TokenKind::Int
        };

        while let Some(c) = self.peek() {
            if !is_number(c) {
                break;
            }

            if c == '.' {
                kind = TokenKind::Float;
            }

            self.eat();
        }

        self.emit(kind);
    }

    fn read_ident(&mut self) {
        while let Some(c) = self.peek() {
            if is_ident(c) || c.is_ascii_digit() {
                self.eat();
            } else {
                break;
            }
        }

        let kind = lookup_keyword(self.current_text()).unwrap_or(TokenKind::Ident);
        self.emit(kind);
    }

    /// Scans up to the closing `quote`. A backslash escapes whatever follows
    /// it, so `\"` never closes a `"` string.
    fn read_string(&mut self, quote: char) -> Result<(), Error> {
        loop {
            match self.eat() {
                None => return Err(self.unterminated_string()),
                Some(c) if c == quote => break,
                Some('\\') => match self.eat() {
                    None => return Err(self.unterminated_string()),
                    Some('\n') => self.line += 1,
                    Some(_) => {}
                },
                Some('\n') => self.line += 1,
                Some(_) => {}
            }
        }

        self.emit(TokenKind::String);
        Ok(())
    }

    /// The open string swallowed the rest of the input: cover it with an
    /// error token so the spans still account for every byte.
    fn unterminated_string(&mut self) -> Error {
        self.emit(TokenKind::Error);
        Error::new(ErrorImpl::UnterminatedString, self.position(self.start_line))
    }

    fn erroneous(&mut self, c: char) {
        self.emit(TokenKind::Error);

        let error = Error::new(
            ErrorImpl::UnrecognisedToken { token: c },
            self.position(self.start_line),
        );
        self.diagnostics.push(error);
    }
}

fn is_number(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '!' || c == '?'
}

/// Scans `source` into an EOF-terminated token stream.
///
/// Unrecognised characters become `Error` tokens and scanning goes on. A
/// string left open at end of input is fatal: scanning stops there, though
/// the stream is still closed with `EOF`.
pub fn tokenize(source: &str, config: &Config) -> (TokenStream, Diagnostics) {
    let mut lex = Lexer::new(source, config);

    LOG_VERBOSE!(config, "starting lexical analysis of {}", config.label);

    while !lex.at_eof() {
        lex.begin_token();

        let Some(c) = lex.eat() else {
            break;
        };

        match c {
            '+' => lex.switch_eq(TokenKind::Plus, TokenKind::PlusEq),
            '/' => lex.switch_eq(TokenKind::Slash, TokenKind::SlashEq),
            '^' => lex.switch_eq(TokenKind::BXor, TokenKind::BXorEq),
            '&' => lex.switch_eq(TokenKind::BAnd, TokenKind::BAndEq),
            '!' => lex.switch_eq(TokenKind::Bang, TokenKind::BangEq),
            '~' => lex.emit(TokenKind::BNot),
            '(' => lex.emit(TokenKind::LParen),
            ')' => lex.emit(TokenKind::RParen),
            '[' => lex.emit(TokenKind::LBracket),
            ']' => lex.emit(TokenKind::RBracket),
            '{' => lex.emit(TokenKind::LBrace),
            '}' => lex.emit(TokenKind::RBrace),
            ':' => lex.emit(TokenKind::Colon),
            ';' => lex.emit(TokenKind::SemiColon),
            ',' => lex.emit(TokenKind::Comma),
            '.' => {
                if matches!(lex.peek(), Some(next) if next.is_ascii_digit()) {
                    lex.read_number();
                } else {
                    lex.emit(TokenKind::Dot);
                }
            }
            '|' => {
                if lex.eat_if('>') {
                    lex.emit(TokenKind::Pipe);
                } else {
                    lex.switch_eq(TokenKind::BOr, TokenKind::BOrEq);
                }
            }
            '%' => {
                if lex.eat_if('%') {
                    lex.read_comment();
                } else {
                    lex.switch_eq(TokenKind::Mod, TokenKind::ModEq);
                }
            }
            '=' => {
                if lex.eat_if('>') {
                    lex.emit(TokenKind::FatArrow);
                } else {
                    lex.switch_eq(TokenKind::Eq, TokenKind::EqEq);
                }
            }
            '-' => {
                if lex.eat_if('>') {
                    lex.emit(TokenKind::Arrow);
                } else {
                    lex.switch_eq(TokenKind::Min, TokenKind::MinEq);
                }
            }
            '<' => {
                if lex.eat_if('<') {
                    lex.switch_eq(TokenKind::LShift, TokenKind::LShiftEq);
                } else {
                    lex.switch_eq(TokenKind::Lt, TokenKind::LtEq);
                }
            }
            '>' => {
                if lex.eat_if('>') {
                    lex.switch_eq(TokenKind::RShift, TokenKind::RShiftEq);
                } else {
                    lex.switch_eq(TokenKind::Gt, TokenKind::GtEq);
                }
            }
            '*' => {
                if lex.eat_if('*') {
                    lex.switch_eq(TokenKind::StarStar, TokenKind::StarStarEq);
                } else {
                    lex.switch_eq(TokenKind::Star, TokenKind::StarEq);
                }
            }
            '\n' => {
                lex.emit(TokenKind::NewLine);
                lex.line += 1;
            }
            ' ' | '\t' | '\r' => lex.skip_whitespace(),
            '"' | '\'' => {
                if let Err(error) = lex.read_string(c) {
                    lex.diagnostics.push(error);
                    break;
                }
            }
            c if is_ident(c) => lex.read_ident(),
            c if c.is_ascii_digit() => lex.read_number(),
            c => lex.erroneous(c),
        }
    }

    lex.begin_token();
    lex.emit(TokenKind::EOF);

    LOG_VERBOSE!(
        config,
        "lexical analysis done: {} tokens, {} diagnostics",
        lex.tokens.len(),
        lex.diagnostics.len()
    );

    (lex.tokens, lex.diagnostics)
}
