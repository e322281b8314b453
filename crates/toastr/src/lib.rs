//! # Toastr
//!
//! Queues toast notifications during a request, flashes them to the session,
//! and renders a toastr.js `<script>` block for the following response.
//!
//! ## Lifecycle
//!
//! | Step | Type | What happens |
//! |------|------|--------------|
//! | Queue | [`NotificationQueue`] | `info`/`error`/... append and flash the whole queue |
//! | Drain | [`NotificationQueue::drain_one`] | pop the oldest record, erase the flash entry |
//! | Render | [`Renderer::render`] | read the flash entry and build the script |
//!
//! ## Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use toastr::{NotificationQueue, Renderer};
//! use toastr_config_and_utils::{JsonConfigRepository, ToastrConfig};
//! use toastr_session_store::FlashSession;
//!
//! let session = Arc::new(FlashSession::new());
//! let config = Arc::new(JsonConfigRepository::from_config(&ToastrConfig::default()));
//!
//! let mut queue = NotificationQueue::new(session.clone());
//! queue.success("Saved", None, None).info("Syncing", Some("Heads up"), None);
//!
//! let renderer = Renderer::new(session, config);
//! let script = renderer.render();
//! ```

mod error;
mod queue;
mod render;
mod titles;
mod types;

pub use error::ToastrError;
pub use queue::NotificationQueue;
pub use render::{render_script, Renderer};
pub use titles::TitleMap;
pub use types::{DrainedNotification, Notification, NotificationType};
