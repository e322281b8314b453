//! Default display titles per notification type.

use crate::NotificationType;
use toastr_config_and_utils::{ConfigRepository, TitleOverrides, TITLE_PATH_PREFIX};

/// Current default title for each notification type.
///
/// Every type always has exactly one title; overrides replace the built-in
/// value and unset overrides leave it alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMap {
    titles: [String; 5],
}

impl Default for TitleMap {
    fn default() -> Self {
        Self {
            titles: NotificationType::ALL.map(|kind| kind.default_title().to_string()),
        }
    }
}

fn slot(kind: NotificationType) -> usize {
    match kind {
        NotificationType::Error => 0,
        NotificationType::Info => 1,
        NotificationType::Success => 2,
        NotificationType::Warning => 3,
        NotificationType::Primary => 4,
    }
}

impl TitleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `toastr.title.<type>` entries from a config repository.
    pub fn from_repository(config: &dyn ConfigRepository) -> Self {
        let mut titles = Self::default();
        titles.configure(NotificationType::ALL.into_iter().filter_map(|kind| {
            config
                .get_str(&format!("{}.{}", TITLE_PATH_PREFIX, kind))
                .map(|title| (kind.as_str(), title))
        }));
        titles
    }

    pub fn get(&self, kind: NotificationType) -> &str {
        &self.titles[slot(kind)]
    }

    pub fn set(&mut self, kind: NotificationType, title: impl Into<String>) {
        self.titles[slot(kind)] = title.into();
    }

    /// Apply overrides keyed by type name. Unknown names are skipped.
    pub fn configure<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, title) in overrides {
            match name.as_ref().parse::<NotificationType>() {
                Ok(kind) => self.set(kind, title),
                Err(err) => tracing::debug!(error = %err, "ignoring title override"),
            }
        }
    }

    /// Apply the typed overrides from a loaded config file.
    pub fn apply(&mut self, overrides: &TitleOverrides) {
        self.configure(overrides.iter());
    }
}
