//! Diagnostic system for the native integer type checker.
//!
//! A diagnostic carries:
//! - An error code for searchability
//! - A short message (what went wrong)
//! - A span (where it went wrong), optionally a related span
//! - Notes and suggestions (context and how to fix)
//!
//! Message wording is not part of the contract; callers and tests match
//! on [`ErrorCode`].

mod diagnostic;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Related, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
