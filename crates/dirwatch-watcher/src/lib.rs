//! Debounced directory change notifications for async consumers.
//!
//! This crate watches a single directory for content changes and turns
//! each burst of raw filesystem activity into one [`Notification`],
//! delivered over a bounded tokio channel after a trailing delay.
//!
//! # Overview
//!
//! The dirwatch-watcher crate is designed to:
//!
//! - Arm OS change notification on a directory via the `notify` crate
//! - Collapse raw changes closer together than a minimum interval
//! - Delay each notification so the burst that caused it can settle
//! - Report watcher death by closing the channel, with the cause available
//!   from [`DebouncedWatcher::shutdown()`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  notify callback thread                                         │
//! │  ┌───────────────────┐    ┌────────────────────────────────┐    │
//! │  │ RecommendedWatcher│ -> │ ChangeMask filter -> Notify    │    │
//! │  └───────────────────┘    └───────────────┬────────────────┘    │
//! └───────────────────────────────────────────│─────────────────────┘
//!                                             │ notify_one
//!                                             ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Async runtime (tokio)                                          │
//! │  supervision loop -> DebounceGate -> delay units -> mpsc        │
//! │                                                    │            │
//! │  DebouncedWatcher::recv() <────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Crate Dependencies
//!
//! ```text
//! dirwatch-cli ──► dirwatch-watcher ──► dirwatch-core
//!              └─► dirwatch-fs
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use dirwatch_watcher::DebouncedWatcher;
//! use dirwatch_core::WatchConfig;
//! use camino::Utf8Path;
//! use tokio::time::{interval, Duration};
//!
//! # async fn example() -> Result<(), dirwatch_watcher::WatchError> {
//! let config = WatchConfig::default(); // 100ms interval, 100ms delay
//! let mut watcher = DebouncedWatcher::new(Utf8Path::new("./inbox"), &config).await?;
//!
//! let mut tick = interval(Duration::from_secs(5));
//!
//! loop {
//!     tokio::select! {
//!         maybe = watcher.recv() => match maybe {
//!             Some(notification) => println!("{} settled", notification.path),
//!             None => break,
//!         },
//!         _ = tick.tick() => {
//!             // Periodic housekeeping
//!         }
//!     }
//! }
//!
//! watcher.shutdown().await
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```
//! use dirwatch_watcher::WatchError;
//!
//! fn describe(err: &WatchError) -> &'static str {
//!     if err.is_construction_error() {
//!         "could not start watching"
//!     } else {
//!         "watcher died"
//!     }
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod debounce;
pub mod error;
pub mod events;
pub mod source;
pub mod watcher;

#[cfg(test)]
mod testing;

pub use debounce::DebounceGate;
pub use error::WatchError;
pub use events::{Notification, RawChange};
pub use source::{ChangeMask, ChangeSource, NotifySource};
pub use watcher::DebouncedWatcher;
