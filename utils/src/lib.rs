//! Shared utilities for the ballot engine.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat, UnknownLogFormat};
