//! Shared utilities for pitoken.

pub mod logging;
pub mod redact;
pub mod time;

pub use logging::{init_logging, LogFormat, LoggingError};
pub use redact::redact_secret;
pub use time::format_duration;
