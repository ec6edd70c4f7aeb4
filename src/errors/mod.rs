//! Error types and diagnostics for the front end.
//!
//! This module defines the errors the lexer and parser report:
//!
//! - Error structures carrying a source position and a severity
//! - Specific error variants for each phase
//! - The `Diagnostics` collection each phase hands back to its caller
//! - Helpful error messages and suggestions

pub mod errors;
