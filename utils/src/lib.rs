//! Shared utilities for the stakeable token.

pub mod logging;
pub mod time;

pub use logging::{init_logging, init_tracing, LogFormat};
pub use time::{format_countdown, format_duration};
