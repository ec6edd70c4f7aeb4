use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// How bad a diagnostic is.
///
/// `Fatal` stops the current phase immediately, `Error` lets the phase run to
/// completion but fails it, `Warning` never fails anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    severity: Severity,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        let severity = error_impl.default_severity();

        Error {
            internal_error: error_impl,
            position,
            severity,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_severity(&self) -> Severity {
        self.severity
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedStatementEnd { .. } => "ExpectedStatementEnd",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::FloatParseError { .. } => "FloatParseError",
            ErrorImpl::NonAssociativeChain { .. } => "NonAssociativeChain",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::UnreachableCode => "UnreachableCode",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "add the closing quote; a backslash escapes the quote that follows it",
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, a statement cannot start here",
                token
            )),
            ErrorImpl::ExpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("insert {} here", expected))
            }
            ErrorImpl::ExpectedStatementEnd { .. } => ErrorTip::Suggestion(String::from(
                "separate statements with a new line or `;`",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::FloatParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid float: `{}`, a float takes a single `.`",
                token
            )),
            ErrorImpl::NonAssociativeChain { operator } => ErrorTip::Suggestion(format!(
                "use parentheses to group the `{}` comparisons",
                operator
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "split the expression or block into named parts",
            )),
            ErrorImpl::UnreachableCode => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position.line() {
            Some(line) => write!(
                f,
                "{}:{}: {}: {}",
                self.position.label(),
                line,
                self.severity,
                self.internal_error
            ),
            None => write!(
                f,
                "{}: {}: {}",
                self.position.label(),
                self.severity,
                self.internal_error
            ),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("erroneous token '{token}'")]
    UnrecognisedToken { token: char },
    #[error("unexpected EOF while scanning string")]
    UnterminatedString,
    #[error("unexpected {token}")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {found}")]
    ExpectedToken { expected: String, found: String },
    #[error("expected end of statement, found {found}")]
    ExpectedStatementEnd { found: String },
    #[error("error parsing integer: {token:?}")]
    NumberParseError { token: String },
    #[error("error parsing float: {token:?}")]
    FloatParseError { token: String },
    #[error("operator {operator:?} is non-associative and cannot be chained")]
    NonAssociativeChain { operator: String },
    #[error("nesting exceeds the limit of {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unreachable statement after return")]
    UnreachableCode,
}

impl ErrorImpl {
    pub fn default_severity(&self) -> Severity {
        match self {
            ErrorImpl::UnterminatedString => Severity::Fatal,
            ErrorImpl::UnreachableCode => Severity::Warning,
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::ExpectedStatementEnd { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::FloatParseError { .. }
            | ErrorImpl::NonAssociativeChain { .. }
            | ErrorImpl::NestingTooDeep { .. } => Severity::Error,
        }
    }
}

/// Ordered collection of the diagnostics one phase produced.
///
/// Every recorded diagnostic is also traced through the `log` facade at
/// `debug` level; rendering them for a user is the driver's job.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn push(&mut self, error: Error) {
        log::debug!("recorded {}", error);

        self.errors.push(error);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
    }

    /// True once anything at `Error` severity or above was recorded.
    pub fn failed(&self) -> bool {
        self.errors
            .iter()
            .any(|error| error.get_severity() >= Severity::Error)
    }

    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(Error::is_fatal)
    }

    pub fn error_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_severity() >= Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_severity() == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
