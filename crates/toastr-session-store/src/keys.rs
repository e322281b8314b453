//! Session key constants.

/// Session keys used by the toastr crates
pub struct SessionKeys;

impl SessionKeys {
    /// Flashed notification collection (JSON array)
    pub const NOTIFICATIONS: &'static str = "toastr::notifications";
}
