//! Configuration types and errors for the dirwatch workspace.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`WatchConfig`]: debounce knobs, recursion and channel capacity for the watcher
//! - [`LogConfig`]: default log level and ANSI output for the binary
//! - [`Config`]: root configuration, loadable from a JSON file
//! - [`ConfigError`]: errors raised while loading or validating configuration

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{Config, LogConfig, WatchConfig};
pub use error::ConfigError;
