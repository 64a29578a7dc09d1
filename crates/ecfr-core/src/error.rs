//! # Error Types
//!
//! The core crate is almost entirely infallible; the only fallible path is
//! parsing a run stamp back from its text form.

use thiserror::Error;

/// Errors raised by `ecfr-core` constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A run stamp string did not match `YYYYMMDDTHHMMSSZ`.
    #[error("invalid run stamp {value:?}: {reason}")]
    InvalidStamp { value: String, reason: String },
}
