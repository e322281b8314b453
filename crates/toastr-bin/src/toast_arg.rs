//! `TYPE:MESSAGE[:TITLE]` command-line toast arguments.

use std::str::FromStr;

/// A toast requested on the command line.
///
/// The type is kept as a raw string so the queue decides what is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastArg {
    pub kind: String,
    pub message: String,
    pub title: Option<String>,
}

impl FromStr for ToastArg {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let message = parts
            .next()
            .ok_or_else(|| format!("expected TYPE:MESSAGE[:TITLE], got '{}'", raw))?;
        if kind.is_empty() {
            return Err(format!("missing toast type in '{}'", raw));
        }

        Ok(Self {
            kind: kind.to_string(),
            message: message.to_string(),
            title: parts.next().map(str::to_string),
        })
    }
}
