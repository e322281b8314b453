//! Per-request notification queue.

use crate::{DrainedNotification, Notification, NotificationType, TitleMap};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use toastr_session_store::{SessionKeys, SessionStore};

/// Accumulates notifications for one request and flashes them to the session.
///
/// Every successful append re-flashes the whole queue, replacing whatever an
/// earlier append (or an earlier request) left under the flash key.
pub struct NotificationQueue {
    session: Arc<dyn SessionStore>,
    titles: TitleMap,
    notifications: VecDeque<Notification>,
}

impl NotificationQueue {
    /// Create an empty queue with the built-in titles.
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self::with_titles(session, TitleMap::default())
    }

    /// Create an empty queue with preconfigured titles.
    pub fn with_titles(session: Arc<dyn SessionStore>, titles: TitleMap) -> Self {
        Self {
            session,
            titles,
            notifications: VecDeque::new(),
        }
    }

    /// Override default titles by type name. Unknown names are ignored.
    pub fn configure_titles<I, K, V>(&mut self, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.titles.configure(overrides);
        self
    }

    pub fn titles(&self) -> &TitleMap {
        &self.titles
    }

    /// Queue a notification from an untrusted type name.
    ///
    /// Returns `false` without touching the queue when `kind` is not a known
    /// type. Otherwise returns whether flashing the queue succeeded.
    pub fn add(
        &mut self,
        kind: &str,
        message: impl Into<String>,
        title: Option<&str>,
        options: Map<String, Value>,
    ) -> bool {
        match kind.parse::<NotificationType>() {
            Ok(kind) => self.push(kind, message, title, options),
            Err(err) => {
                tracing::warn!(error = %err, "rejected notification");
                false
            }
        }
    }

    /// Queue a notification of a known type.
    ///
    /// A missing or empty `title` falls back to the current default for `kind`.
    pub fn push(
        &mut self,
        kind: NotificationType,
        message: impl Into<String>,
        title: Option<&str>,
        options: Map<String, Value>,
    ) -> bool {
        let title = match title {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => self.titles.get(kind).to_string(),
        };

        self.notifications.push_back(Notification {
            kind,
            title,
            message: message.into(),
            options,
        });

        self.flash()
    }

    pub fn info(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
        options: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.push(NotificationType::Info, message, title, options.unwrap_or_default());
        self
    }

    pub fn error(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
        options: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.push(NotificationType::Error, message, title, options.unwrap_or_default());
        self
    }

    pub fn warning(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
        options: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.push(NotificationType::Warning, message, title, options.unwrap_or_default());
        self
    }

    pub fn success(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
        options: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.push(NotificationType::Success, message, title, options.unwrap_or_default());
        self
    }

    pub fn primary(
        &mut self,
        message: impl Into<String>,
        title: Option<&str>,
        options: Option<Map<String, Value>>,
    ) -> &mut Self {
        self.push(NotificationType::Primary, message, title, options.unwrap_or_default());
        self
    }

    /// Drop every in-memory notification. Already flashed data stays put.
    pub fn clear(&mut self) -> &mut Self {
        self.notifications.clear();
        self
    }

    /// Erase the flashed entry and pop the oldest notification.
    pub fn drain_one(&mut self) -> Option<DrainedNotification> {
        if let Err(err) = self.session.remove(SessionKeys::NOTIFICATIONS) {
            tracing::warn!(error = %err, "failed to remove flashed notifications");
        }
        let drained = self.notifications.pop_front().map(DrainedNotification::from);
        tracing::debug!(
            drained = drained.is_some(),
            remaining = self.notifications.len(),
            "drained notification"
        );
        drained
    }

    /// [`drain_one`](Self::drain_one) serialized to JSON; `"null"` when empty.
    pub fn drain_one_as_text(&mut self) -> String {
        let drained = self.drain_one();
        serde_json::to_string(&drained).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to serialize notification");
            "null".to_string()
        })
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// In-memory notifications, oldest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    fn flash(&self) -> bool {
        let value = match serde_json::to_value(&self.notifications) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize notifications");
                return false;
            }
        };

        match self.session.flash(SessionKeys::NOTIFICATIONS, value) {
            Ok(()) => {
                tracing::debug!(count = self.notifications.len(), "flashed notifications");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to flash notifications");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toastr_session_store::{FlashSession, SessionError, SessionResult};

    struct ReadOnlySession;

    impl SessionStore for ReadOnlySession {
        fn flash(&self, _key: &str, _value: Value) -> SessionResult<()> {
            Err(SessionError::Backend("read-only".to_string()))
        }

        fn get(&self, _key: &str) -> SessionResult<Option<Value>> {
            Ok(None)
        }

        fn remove(&self, _key: &str) -> SessionResult<()> {
            Ok(())
        }
    }

    fn make_queue() -> (Arc<FlashSession>, NotificationQueue) {
        let session = Arc::new(FlashSession::new());
        let queue = NotificationQueue::new(session.clone());
        (session, queue)
    }

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("options fixture must be an object"),
        }
    }

    fn flashed(session: &FlashSession) -> Option<Value> {
        session.get(SessionKeys::NOTIFICATIONS).unwrap()
    }

    // =========================================================================
    // add / push
    // =========================================================================

    #[test]
    fn add_uses_default_title_for_every_type() {
        let (_session, mut queue) = make_queue();
        for kind in NotificationType::ALL {
            assert!(queue.add(kind.as_str(), "m", None, Map::new()));
            let last = queue.notifications().last().unwrap();
            assert_eq!(last.kind, kind);
            assert_eq!(last.title, kind.default_title());
            assert_eq!(last.message, "m");
        }
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn add_empty_title_falls_back_to_default() {
        let (_session, mut queue) = make_queue();
        queue.add("error", "m", Some(""), Map::new());
        assert_eq!(queue.notifications().next().unwrap().title, "Error");
    }

    #[test]
    fn add_explicit_title_wins() {
        let (_session, mut queue) = make_queue();
        queue.add("error", "m", Some("Boom"), Map::new());
        assert_eq!(queue.notifications().next().unwrap().title, "Boom");
    }

    #[test]
    fn add_unknown_type_is_rejected_without_mutation() {
        let (session, mut queue) = make_queue();
        assert!(!queue.add("bogus", "m", None, Map::new()));
        assert!(queue.is_empty());
        assert!(flashed(&session).is_none());
    }

    #[test]
    fn add_flashes_entire_queue_each_time() {
        let (session, mut queue) = make_queue();
        queue.add("info", "first", None, Map::new());
        queue.add("error", "second", None, options(json!({ "timeOut": 1 })));

        assert_eq!(
            flashed(&session).unwrap(),
            json!([
                { "type": "info", "title": "Info", "text": "first", "options": {} },
                { "type": "error", "title": "Error", "text": "second", "options": { "timeOut": 1 } }
            ])
        );
    }

    #[test]
    fn add_overwrites_flash_from_previous_request() {
        let (session, mut queue) = make_queue();
        queue.info("old", None, None);
        session.advance();

        let mut next = NotificationQueue::new(session.clone());
        next.success("new", None, None);

        let stored = flashed(&session).unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 1);
        assert_eq!(stored[0]["text"], json!("new"));
    }

    #[test]
    fn add_reports_flash_failure() {
        let mut queue = NotificationQueue::new(Arc::new(ReadOnlySession));
        assert!(!queue.add("info", "m", None, Map::new()));
        // The record is still kept in memory.
        assert_eq!(queue.len(), 1);
    }

    // =========================================================================
    // titles
    // =========================================================================

    #[test]
    fn configure_titles_affects_only_named_type() {
        let (_session, mut queue) = make_queue();
        queue.configure_titles([("info", "FYI"), ("nonsense", "x")]);

        queue.add("info", "m", None, Map::new());
        queue.add("warning", "m", None, Map::new());

        let titles: Vec<_> = queue.notifications().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["FYI", "Warning"]);
    }

    #[test]
    fn with_titles_uses_supplied_map() {
        let mut titles = TitleMap::new();
        titles.set(NotificationType::Primary, "Note");
        let mut queue = NotificationQueue::with_titles(Arc::new(FlashSession::new()), titles);

        queue.primary("m", None, None);
        assert_eq!(queue.notifications().next().unwrap().title, "Note");
        assert_eq!(queue.titles().get(NotificationType::Primary), "Note");
    }

    // =========================================================================
    // convenience methods
    // =========================================================================

    #[test]
    fn convenience_methods_chain_in_order() {
        let (_session, mut queue) = make_queue();
        queue
            .info("a", None, None)
            .error("b", None, None)
            .warning("c", None, None)
            .success("d", None, None)
            .primary("e", Some("Custom"), Some(options(json!({ "x": 1 }))));

        let kinds: Vec<_> = queue.notifications().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NotificationType::Info,
                NotificationType::Error,
                NotificationType::Warning,
                NotificationType::Success,
                NotificationType::Primary,
            ]
        );
        let last = queue.notifications().last().unwrap();
        assert_eq!(last.title, "Custom");
        assert_eq!(last.options.get("x"), Some(&json!(1)));
    }

    // =========================================================================
    // clear / drain
    // =========================================================================

    #[test]
    fn clear_keeps_flashed_entry() {
        let (session, mut queue) = make_queue();
        queue.info("m", None, None).clear();

        assert!(queue.is_empty());
        assert!(flashed(&session).is_some());
    }

    #[test]
    fn drain_one_on_empty_queue_is_none() {
        let (_session, mut queue) = make_queue();
        assert!(queue.drain_one().is_none());
        assert_eq!(queue.drain_one_as_text(), "null");
    }

    #[test]
    fn drain_one_pops_oldest_and_erases_flash() {
        let (session, mut queue) = make_queue();
        queue.success("ok", None, None).error("bad", None, None);

        let drained = queue.drain_one().unwrap();
        assert_eq!(drained.kind, NotificationType::Success);
        assert_eq!(drained.title, "Success");
        assert_eq!(drained.text, "ok");
        assert!(drained.options.is_none());

        assert_eq!(queue.len(), 1);
        assert!(flashed(&session).is_none());
    }

    #[test]
    fn drain_one_keeps_populated_options() {
        let (_session, mut queue) = make_queue();
        queue.add("success", "ok", None, options(json!({ "timeOut": 500 })));

        let drained = queue.drain_one().unwrap();
        assert_eq!(drained.options, Some(options(json!({ "timeOut": 500 }))));
    }

    #[test]
    fn drain_one_as_text_matches_drained_shape() {
        let (_session, mut queue) = make_queue();
        queue
            .success("ok", None, None)
            .success("ok", None, Some(options(json!({ "timeOut": 500 }))));

        let first: Value = serde_json::from_str(&queue.drain_one_as_text()).unwrap();
        assert_eq!(first, json!({ "type": "success", "title": "Success", "text": "ok" }));

        let second: Value = serde_json::from_str(&queue.drain_one_as_text()).unwrap();
        assert_eq!(
            second,
            json!({ "type": "success", "title": "Success", "text": "ok", "options": { "timeOut": 500 } })
        );
    }
}
