//! Per-run configuration shared by the lexer and the parser.
//!
//! A `Config` is built once by whoever drives the front end and passed by
//! reference into [`tokenize`](crate::lexer::lexer::tokenize) and
//! [`parse`](crate::parser::parser::parse). Nothing in the front end keeps
//! process-wide state, so independent runs never observe each other.

use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Label attached to every diagnostic: a path, `stdin`, or `shell`
    pub label: Rc<String>,
    /// Promotes phase progress logging from `debug` to `info`
    pub verbose: bool,
    /// The driver dumps the token stream after lexing
    pub show_tokens: bool,
    /// The driver dumps the AST after parsing
    pub show_ast: bool,
}

impl Config {
    pub fn new(label: impl Into<String>) -> Self {
        Config {
            label: Rc::new(label.into()),
            verbose: false,
            show_tokens: false,
            show_ast: false,
        }
    }

    /// Configuration for source read from standard input.
    pub fn stdin() -> Self {
        Config::new("stdin")
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_show_tokens(mut self, show_tokens: bool) -> Self {
        self.show_tokens = show_tokens;
        self
    }

    pub fn with_show_ast(mut self, show_ast: bool) -> Self {
        self.show_ast = show_ast;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new("shell")
    }
}
