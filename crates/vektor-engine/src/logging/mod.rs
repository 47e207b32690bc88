//! Logging utilities.
//!
//! This module centralizes logger initialization. The rest of the crate only
//! talks to the `log` facade; `env_logger` is the backend installed here.

mod init;

pub use init::{LoggingConfig, init_logging};
