//! Session flash storage for toastr notifications.
//!
//! The host framework owns the real session; this crate describes the small
//! contract the notification queue needs from it ([`SessionStore`]) and ships
//! an in-memory two-slot implementation ([`FlashSession`]) for single-process
//! hosts and tests.

mod flash;
mod keys;
mod traits;

pub use flash::FlashSession;
pub use keys::SessionKeys;
pub use traits::SessionStore;

use thiserror::Error;

/// Error type for session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Backend-specific storage error
    #[error("Session backend error: {0}")]
    Backend(String),

    /// Stored value did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
