//! Error types for toastr.

use thiserror::Error;

/// Errors raised when converting untrusted input into toastr types.
///
/// The queue itself never returns these; it logs them and reports `false`.
#[derive(Error, Debug)]
pub enum ToastrError {
    #[error("Unknown notification type: {0}")]
    InvalidType(String),
}
