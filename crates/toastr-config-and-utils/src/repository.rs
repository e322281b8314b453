//! Dot-path configuration lookup.
//!
//! Hosts expose their configuration as a tree addressed by dotted paths such
//! as `toastr.options` or `toastr.title.info`. [`ConfigRepository`] is the
//! read side of that contract; [`JsonConfigRepository`] implements it over a
//! JSON document.

use crate::ToastrConfig;
use serde_json::{Map, Value};

/// Path of the default client-side options map.
pub const OPTIONS_PATH: &str = "toastr.options";

/// Prefix of the per-type title overrides (`toastr.title.<type>`).
pub const TITLE_PATH_PREFIX: &str = "toastr.title";

/// Read access to host configuration.
pub trait ConfigRepository: Send + Sync {
    /// Look up a value by dotted path. Missing and `null` values are `None`.
    fn get(&self, path: &str) -> Option<Value>;

    /// Look up an object by dotted path, treating anything else as empty.
    fn get_map(&self, path: &str) -> Map<String, Value> {
        match self.get(path) {
            Some(Value::Object(map)) => map,
            Some(other) => {
                tracing::warn!(path, found = %other, "expected an object in config");
                Map::new()
            }
            None => Map::new(),
        }
    }

    /// Look up a string by dotted path.
    fn get_str(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Configuration repository backed by a JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonConfigRepository {
    root: Value,
}

impl JsonConfigRepository {
    /// Wrap an arbitrary JSON document.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Build a repository exposing a [`ToastrConfig`] under the `toastr` root.
    pub fn from_config(config: &ToastrConfig) -> Self {
        let mut root = Map::new();
        let mut toastr = Map::new();
        toastr.insert("options".into(), Value::Object(config.options.clone()));

        let titles: Map<String, Value> = config
            .title
            .iter()
            .map(|(kind, title)| (kind.to_string(), Value::String(title.to_string())))
            .collect();
        toastr.insert("title".into(), Value::Object(titles));

        root.insert("toastr".into(), Value::Object(toastr));
        Self::new(Value::Object(root))
    }
}

impl ConfigRepository for JsonConfigRepository {
    fn get(&self, path: &str) -> Option<Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        match current {
            Value::Null => None,
            value => Some(value.clone()),
        }
    }
}
