//! toastr.js script rendering.

use crate::Notification;
use serde_json::{Map, Value};
use std::sync::Arc;
use toastr_config_and_utils::{ConfigRepository, OPTIONS_PATH};
use toastr_session_store::{SessionKeys, SessionStore};

/// Renders flashed notifications as a `<script>` block.
pub struct Renderer {
    session: Arc<dyn SessionStore>,
    config: Arc<dyn ConfigRepository>,
}

impl Renderer {
    pub fn new(session: Arc<dyn SessionStore>, config: Arc<dyn ConfigRepository>) -> Self {
        Self { session, config }
    }

    /// Render the flashed notifications.
    ///
    /// Returns `None` while a non-empty notification list is still flashed
    /// under the session key. Only once that entry is gone (expired or
    /// drained) does rendering go ahead, reading the same key again.
    ///
    /// NOTE: the guard fires on *pending* notifications, so the body is only
    /// ever built from an absent or empty entry. Do not flip it without
    /// checking consumers. [`render_script`] renders a known list directly.
    pub fn render(&self) -> Option<String> {
        if self.has_pending() {
            tracing::debug!("flashed notifications pending, render suppressed");
            return None;
        }

        let notifications = self.flashed();
        let defaults = self.config.get_map(OPTIONS_PATH);
        Some(render_script(&defaults, &notifications))
    }

    fn has_pending(&self) -> bool {
        match self.session.get(SessionKeys::NOTIFICATIONS) {
            Ok(Some(value)) => is_truthy(&value),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read flashed notifications");
                false
            }
        }
    }

    fn flashed(&self) -> Vec<Notification> {
        match self
            .session
            .get_as::<Vec<Notification>>(SessionKeys::NOTIFICATIONS)
        {
            Ok(notifications) => notifications.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable flashed notifications");
                Vec::new()
            }
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
    }
}

/// Build the script block for `notifications`.
///
/// Each notification's options are shallow-merged over `defaults`. A
/// `toastr.options = ...;` statement is written only when the merged options
/// differ from the last ones written.
pub fn render_script(defaults: &Map<String, Value>, notifications: &[Notification]) -> String {
    let mut output = String::from("<script>");
    let mut last_config = Map::new();

    for notification in notifications {
        let mut config = defaults.clone();
        for (key, value) in &notification.options {
            config.insert(key.clone(), value.clone());
        }

        if config != last_config {
            output.push_str("toastr.options = ");
            output.push_str(&options_json(&config));
            output.push(';');
            last_config = config;
        }

        output.push_str("toastr.");
        output.push_str(notification.kind.as_str());
        output.push_str("('");
        output.push_str(&escape_message(&notification.message));
        output.push_str("', '");
        output.push_str(&escape_title(&notification.title));
        output.push_str("');");
    }

    output.push_str("</script>");
    tracing::debug!(count = notifications.len(), "rendered notifications");
    output
}

/// Options serialized for inline script use: `/` is written as `\/` so no
/// value can close the surrounding `<script>` element.
fn options_json(config: &Map<String, Value>) -> String {
    Value::Object(config.clone()).to_string().replace('/', "\\/")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_quotes(raw: &str) -> String {
    raw.replace('\'', "\\'")
}

/// Messages may carry markup: entities are escaped, then angle brackets are
/// restored.
fn escape_message(message: &str) -> String {
    let escaped = escape_html(message).replace("&lt;", "<").replace("&gt;", ">");
    escape_quotes(&escaped)
}

fn escape_title(title: &str) -> String {
    escape_quotes(&escape_html(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationType;
    use serde_json::json;

    fn note(kind: NotificationType, message: &str, title: &str, options: Value) -> Notification {
        Notification {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            options: options.as_object().cloned().unwrap_or_default(),
        }
    }

    fn defaults(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn empty_list_renders_empty_script() {
        assert_eq!(render_script(&Map::new(), &[]), "<script></script>");
    }

    #[test]
    fn identical_effective_config_is_written_once() {
        let notifications = [
            note(NotificationType::Info, "one", "Info", json!({})),
            note(NotificationType::Info, "two", "Info", json!({ "closeButton": false })),
        ];
        let script = render_script(&defaults(json!({ "closeButton": false })), &notifications);

        assert_eq!(script.matches("toastr.options = ").count(), 1);
        assert_eq!(
            script,
            "<script>toastr.options = {\"closeButton\":false};\
             toastr.info('one', 'Info');toastr.info('two', 'Info');</script>"
        );
    }

    #[test]
    fn changed_config_is_written_again() {
        let notifications = [
            note(NotificationType::Success, "a", "Success", json!({})),
            note(NotificationType::Error, "b", "Error", json!({ "timeOut": 0 })),
            note(NotificationType::Warning, "c", "Warning", json!({})),
        ];
        let script = render_script(&defaults(json!({ "timeOut": 5000 })), &notifications);

        assert_eq!(
            script,
            "<script>toastr.options = {\"timeOut\":5000};toastr.success('a', 'Success');\
             toastr.options = {\"timeOut\":0};toastr.error('b', 'Error');\
             toastr.options = {\"timeOut\":5000};toastr.warning('c', 'Warning');</script>"
        );
    }

    #[test]
    fn overrides_keep_default_key_order() {
        let notifications = [note(
            NotificationType::Info,
            "m",
            "Info",
            json!({ "extra": true, "a": 9 }),
        )];
        let script = render_script(&defaults(json!({ "a": 1, "b": 2 })), &notifications);

        assert!(script.starts_with("<script>toastr.options = {\"a\":9,\"b\":2,\"extra\":true};"));
    }

    #[test]
    fn comparison_is_structural_not_ordered() {
        let notifications = [
            note(NotificationType::Info, "x", "Info", json!({ "b": 2, "a": 1 })),
            note(NotificationType::Info, "y", "Info", json!({ "a": 1, "b": 2 })),
        ];
        let script = render_script(&Map::new(), &notifications);
        assert_eq!(script.matches("toastr.options = ").count(), 1);
    }

    #[test]
    fn empty_defaults_without_overrides_write_no_options() {
        let notifications = [note(NotificationType::Primary, "m", "Primary", json!({}))];
        assert_eq!(
            render_script(&Map::new(), &notifications),
            "<script>toastr.primary('m', 'Primary');</script>"
        );
    }

    #[test]
    fn message_markup_survives_and_quotes_are_escaped() {
        let notifications = [note(NotificationType::Info, "It's <b>big</b>", "Info", json!({}))];
        assert_eq!(
            render_script(&Map::new(), &notifications),
            "<script>toastr.info('It\\'s <b>big</b>', 'Info');</script>"
        );
    }

    #[test]
    fn empty_title_is_still_passed() {
        let notifications = [note(NotificationType::Error, "m", "", json!({}))];
        assert_eq!(
            render_script(&Map::new(), &notifications),
            "<script>toastr.error('m', '');</script>"
        );
    }

    #[test]
    fn option_values_cannot_close_the_script() {
        let notifications = [note(
            NotificationType::Info,
            "m",
            "Info",
            json!({ "positionClass": "</script><script>alert(1)</script>" }),
        )];
        let script = render_script(&Map::new(), &notifications);

        assert!(!script.contains("</script><script>alert(1)"));
        assert_eq!(script.matches("</script>").count(), 1);
        assert_eq!(
            script,
            "<script>toastr.options = {\"positionClass\":\"<\\/script><script>alert(1)<\\/script>\"};\
             toastr.info('m', 'Info');</script>"
        );
    }

    #[test]
    fn options_json_escapes_slashes_in_keys_and_values() {
        let config = defaults(json!({ "a/b": "https://x.test/", "n": 1 }));
        let json = options_json(&config);
        assert_eq!(json, "{\"a\\/b\":\"https:\\/\\/x.test\\/\",\"n\":1}");

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Value::Object(config));
    }

    #[test]
    fn message_entities_are_escaped() {
        assert_eq!(escape_message("a & \"b\""), "a &amp; &quot;b&quot;");
        assert_eq!(escape_message("&lt;"), "&amp;lt;");
    }

    #[test]
    fn title_markup_is_escaped() {
        assert_eq!(escape_title("<i>Bob's</i>"), "&lt;i&gt;Bob\\'s&lt;/i&gt;");
    }

    #[test]
    fn truthiness_follows_flash_contents() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(is_truthy(&json!([{}])));
        assert!(is_truthy(&json!("x")));
    }
}
