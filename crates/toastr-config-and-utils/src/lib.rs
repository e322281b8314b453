//! Configuration, logging, and shared utilities for the toastr crates.

mod config;
mod error;
mod logging;
mod paths;
mod repository;

pub use config::{ToastrConfig, TitleOverrides, DEFAULT_LOG_LEVEL};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::Paths;
pub use repository::{ConfigRepository, JsonConfigRepository, OPTIONS_PATH, TITLE_PATH_PREFIX};
