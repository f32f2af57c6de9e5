//! Logging utilities.
//!
//! Centralizes logger initialization. Engine code only talks to the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
