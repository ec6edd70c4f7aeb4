#![allow(clippy::module_inception)]

use std::rc::Rc;

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

/// A source line inside a labelled source, used to tag diagnostics.
///
/// The line is `None` for diagnostics that are not tied to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub Option<usize>, pub Rc<String>);

impl Position {
    pub fn line(&self) -> Option<usize> {
        self.0
    }

    pub fn label(&self) -> &str {
        &self.1
    }
}

/// Half-open byte range `[start, end)` into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Returns the text of the 1-based `line` in `source`, without its newline.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split_inclusive('\n')
        .nth(line - 1)
        .map(|text| text.trim_end_matches(['\n', '\r']))
}

#[cfg(test)]
mod tests {
    use super::{get_line, Span};

    #[test]
    fn test_get_line() {
        let source = "first\nsecond\r\n\nfourth";

        assert_eq!(get_line(source, 1), Some("first"));
        assert_eq!(get_line(source, 2), Some("second"));
        assert_eq!(get_line(source, 3), Some(""));
        assert_eq!(get_line(source, 4), Some("fourth"));
        assert_eq!(get_line(source, 5), None);
        assert_eq!(get_line(source, 0), None);
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(4, 6).merge(&Span::new(1, 3));

        assert_eq!(merged, Span::new(1, 6));
        assert_eq!(merged.len(), 5);
        assert!(Span::new(3, 3).is_empty());
    }
}
