//! Logger initialization.
//!
//! The crate logs through the `log` facade only; this module installs
//! `env_logger` for binaries, benches and tests that want output.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
