//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `LOG_VERBOSE!` - Logs phase progress at `info` in verbose runs, `debug` otherwise

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), 1, Span::new(0, 2));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            span: $span,
        }
    };
}

/// Logs a progress message, honouring the `verbose` flag of a `Config`.
///
/// # Example
///
/// ```ignore
/// LOG_VERBOSE!(config, "starting lexical analysis of {}", config.label);
/// ```
#[macro_export]
macro_rules! LOG_VERBOSE {
    ($config:expr, $($arg:tt)+) => {
        if $config.verbose {
            log::info!($($arg)+);
        } else {
            log::debug!($($arg)+);
        }
    };
}
