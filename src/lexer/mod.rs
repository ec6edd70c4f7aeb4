//! Lexical analysis module.
//!
//! This module contains the lexer that converts source text into an
//! EOF-terminated stream of tokens for parsing. It handles:
//!
//! - Operator disambiguation (`+` / `+=`, `*` / `**` / `**=`, `|>`, `=>` ...)
//! - Keywords, identifiers, integer/float and string literals
//! - Statement-significant new lines, discarded whitespace and `%%` comments
//! - Recovery from unrecognised characters, and the fatal unterminated string

pub mod lexer;
pub mod tokens;
