//! File Processor common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared plumbing for the File Processor workspace members. Today that is
//! the logging setup used by the server binary.

pub mod logging;

pub use logging::{init_logging, LogConfig, LoggingGuard};
