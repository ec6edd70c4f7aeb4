use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, ops::Index};

use crate::Span;

lazy_static! {
    /// Reserved words, matched exactly against a scanned identifier.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("module", TokenKind::Module);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("match", TokenKind::Match);
        map.insert("unless", TokenKind::Unless);
        map.insert("else", TokenKind::Else);
        map.insert("use", TokenKind::Use);
        map.insert("include", TokenKind::Include);
        map.insert("mut", TokenKind::Mut);
        map.insert("struct", TokenKind::Struct);
        map
    };
}

pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    RESERVED_LOOKUP.get(ident).copied()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Plus,       // +
    PlusEq,     // +=
    Min,        // -
    MinEq,      // -=
    BOr,        // |
    BOrEq,      // |=
    BXor,       // ^
    BXorEq,     // ^=
    BAnd,       // &
    BAndEq,     // &=
    BNot,       // ~
    LShift,     // <<
    LShiftEq,   // <<=
    RShift,     // >>
    RShiftEq,   // >>=
    And,        // and
    Or,         // or
    Slash,      // /
    SlashEq,    // /=
    Star,       // *
    StarEq,     // *=
    StarStar,   // **
    StarStarEq, // **=
    Mod,        // %
    ModEq,      // %=
    Bang,       // !
    BangEq,     // !=
    Lt,         // <
    LtEq,       // <=
    Gt,         // >
    GtEq,       // >=
    Eq,         // =
    EqEq,       // ==
    Pipe,       // |>

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Dot,
    SemiColon,
    Colon,
    FatArrow, // =>
    Arrow,    // ->
    Comma,

    Int,
    Float,
    String,
    Ident,

    // Reserved
    If,
    Unless,
    Else,
    Match,
    Module,
    Return,
    Use,
    Include,
    Mut,
    Struct,

    Error,
    NewLine,
    EOF,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Plus => "+",
            TokenKind::PlusEq => "+=",
            TokenKind::Min => "-",
            TokenKind::MinEq => "-=",
            TokenKind::BOr => "|",
            TokenKind::BOrEq => "|=",
            TokenKind::BXor => "^",
            TokenKind::BXorEq => "^=",
            TokenKind::BAnd => "&",
            TokenKind::BAndEq => "&=",
            TokenKind::BNot => "~",
            TokenKind::LShift => "<<",
            TokenKind::LShiftEq => "<<=",
            TokenKind::RShift => ">>",
            TokenKind::RShiftEq => ">>=",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Slash => "/",
            TokenKind::SlashEq => "/=",
            TokenKind::Star => "*",
            TokenKind::StarEq => "*=",
            TokenKind::StarStar => "**",
            TokenKind::StarStarEq => "**=",
            TokenKind::Mod => "%",
            TokenKind::ModEq => "%=",
            TokenKind::Bang => "!",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Pipe => "|>",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Dot => ".",
            TokenKind::SemiColon => ";",
            TokenKind::Colon => ":",
            TokenKind::FatArrow => "=>",
            TokenKind::Arrow => "->",
            TokenKind::Comma => ",",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Ident => "identifier",
            TokenKind::If => "if",
            TokenKind::Unless => "unless",
            TokenKind::Else => "else",
            TokenKind::Match => "match",
            TokenKind::Module => "module",
            TokenKind::Return => "return",
            TokenKind::Use => "use",
            TokenKind::Include => "include",
            TokenKind::Mut => "mut",
            TokenKind::Struct => "struct",
            TokenKind::Error => "error",
            TokenKind::NewLine => "new line",
            TokenKind::EOF => "eof",
        }
    }

    /// Kinds that end a statement without being part of it.
    pub fn is_statement_end(&self) -> bool {
        matches!(
            self,
            TokenKind::NewLine | TokenKind::SemiColon | TokenKind::RBrace | TokenKind::EOF
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact lexeme, `source[span.start..span.end]`
    pub value: String,
    /// 1-based line the token starts on
    pub line: usize,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:>16}): {}", self.kind, self.value.escape_debug())
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// How the token is named in diagnostics: the lexeme for tokens that
    /// carry one, the kind name otherwise.
    pub fn describe(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::String,
            TokenKind::Ident,
            TokenKind::Error,
        ]) {
            format!("{} '{}'", self.kind, self.value)
        } else {
            match self.kind {
                TokenKind::NewLine | TokenKind::EOF => self.kind.to_string(),
                _ => format!("'{}'", self.kind),
            }
        }
    }
}

/// Ordered, EOF-terminated sequence of tokens produced by the lexer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        TokenStream { tokens: vec![] }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }

    /// One line per token, kind name right-aligned.
    pub fn dump(&self) -> String {
        let mut result = String::new();

        for token in &self.tokens {
            result.push_str(&token.to_string());
            result.push('\n');
        }

        result
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
