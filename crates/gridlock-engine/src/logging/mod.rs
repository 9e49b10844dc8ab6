//! Logging utilities.
//!
//! Centralizes logger initialization. The rest of the engine only ever talks
//! to the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
