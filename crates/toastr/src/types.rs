//! Notification records.

use crate::ToastrError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Toast flavour, matching the toastr.js function of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Error,
    Info,
    Success,
    Warning,
    Primary,
}

impl NotificationType {
    /// Every type, in the order titles are configured.
    pub const ALL: [NotificationType; 5] = [
        NotificationType::Error,
        NotificationType::Info,
        NotificationType::Success,
        NotificationType::Warning,
        NotificationType::Primary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::Error => "error",
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Primary => "primary",
        }
    }

    /// Built-in display title used when nothing is configured.
    pub fn default_title(self) -> &'static str {
        match self {
            NotificationType::Error => "Error",
            NotificationType::Info => "Info",
            NotificationType::Success => "Success",
            NotificationType::Warning => "Warning",
            NotificationType::Primary => "Primary",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive: only the lowercase names are accepted.
impl FromStr for NotificationType {
    type Err = ToastrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ToastrError::InvalidType(s.to_string()))
    }
}

/// A queued toast, in the shape flashed to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    #[serde(rename = "text")]
    pub message: String,
    /// Overrides merged over the default client options at render time.
    #[serde(default)]
    pub options: Map<String, Value>,
}

/// A notification popped off the queue.
///
/// `options` is `None` when the notification carried no overrides, so the
/// serialized form has no `options` key at all in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainedNotification {
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

impl From<Notification> for DrainedNotification {
    fn from(notification: Notification) -> Self {
        let options = if notification.options.is_empty() {
            None
        } else {
            Some(notification.options)
        };
        Self {
            kind: notification.kind,
            title: notification.title,
            text: notification.message,
            options,
        }
    }
}
