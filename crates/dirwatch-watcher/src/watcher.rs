//! Debounced directory watcher with async notification delivery.
//!
//! This module provides the [`DebouncedWatcher`] type, which owns a
//! [`ChangeSource`], runs the supervision loop on the tokio runtime, and hands
//! the consumer a channel of [`Notification`]s.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                  Supervision loop (tokio::spawn)                 │
//! │  ┌──────────────┐    ┌───────────────┐    ┌──────────────────┐   │
//! │  │ ChangeSource │ -> │ DebounceGate  │ -> │ delay unit       │   │
//! │  │ wait_next()  │    │ (> interval?) │    │ (trailing delay) │   │
//! │  └──────────────┘    └───────────────┘    └────────┬─────────┘   │
//! └────────────────────────────────────────────────────│─────────────┘
//!                                                      │ send (blocks when full)
//!                                                      ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  DebouncedWatcher: mpsc::Receiver<Notification> -> consumer      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use dirwatch_watcher::DebouncedWatcher;
//! use dirwatch_core::WatchConfig;
//! use camino::Utf8Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WatchConfig::default();
//!     let mut watcher = DebouncedWatcher::new(Utf8Path::new("/srv/inbox"), &config).await?;
//!
//!     while let Some(notification) = watcher.recv().await {
//!         println!("{} changed", notification.path);
//!     }
//!
//!     // The channel closed: the watcher died. Find out why.
//!     watcher.shutdown().await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use dirwatch_core::WatchConfig;

use crate::debounce::DebounceGate;
use crate::error::WatchError;
use crate::events::Notification;
use crate::source::{ChangeMask, ChangeSource, NotifySource};

/// A directory watcher that collapses bursts of changes into single
/// notifications.
///
/// # Lifecycle
///
/// 1. **Creation**: [`DebouncedWatcher::new()`] validates the path, arms a
///    [`NotifySource`], allocates the channel, and spawns the supervision loop.
///    On any failure nothing is spawned.
///
/// 2. **Reception**: [`recv()`](Self::recv) yields one [`Notification`] per
///    debounce window, in the order the windows opened.
///
/// 3. **Termination**: the loop stops when the source fails or the
///    cancellation token fires. Notifications already scheduled before a
///    source failure are still delivered; after that the channel closes and
///    `recv()` returns `None`. [`shutdown()`](Self::shutdown) cancels, joins
///    the loop and returns its terminal error, if any. Dropping the watcher
///    cancels it.
///
/// # Examples
///
/// ```no_run
/// use dirwatch_watcher::DebouncedWatcher;
/// use dirwatch_core::WatchConfig;
/// use camino::Utf8Path;
///
/// # async fn example() -> Result<(), dirwatch_watcher::WatchError> {
/// let config = WatchConfig::default().with_timings(200, 50);
/// let mut watcher = DebouncedWatcher::new(Utf8Path::new("./data"), &config).await?;
///
/// if let Some(notification) = watcher.recv().await {
///     println!("Changed: {}", notification.path);
/// }
/// watcher.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct DebouncedWatcher {
    /// Cancels the supervision loop and every pending delay unit.
    cancel: CancellationToken,

    /// Handle to the supervision loop.
    ///
    /// Set to `None` once the loop has been joined.
    task_handle: Option<JoinHandle<Result<(), WatchError>>>,

    /// Consumer side of the notification channel.
    notification_rx: mpsc::Receiver<Notification>,

    /// The directory being watched.
    watch_path: Utf8PathBuf,

    /// The configuration the watcher was started with.
    config: WatchConfig,
}

impl std::fmt::Debug for DebouncedWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebouncedWatcher")
            .field("watch_path", &self.watch_path)
            .field("config", &self.config)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl DebouncedWatcher {
    /// Starts watching `path` with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::PathNotFound`] if the path doesn't exist,
    /// [`WatchError::NotADirectory`] if it isn't a directory,
    /// [`WatchError::Config`] if the configuration is invalid, and
    /// [`WatchError::ArmFailed`] if change notification cannot be armed.
    pub async fn new(path: &Utf8Path, config: &WatchConfig) -> Result<Self, WatchError> {
        Self::with_cancellation(path, config, CancellationToken::new()).await
    }

    /// Starts watching `path`, stopping when `cancel` fires.
    ///
    /// Use this to tie the watcher to a larger service lifecycle.
    pub async fn with_cancellation(
        path: &Utf8Path,
        config: &WatchConfig,
        cancel: CancellationToken,
    ) -> Result<Self, WatchError> {
        if !path.exists() {
            return Err(WatchError::path_not_found(path));
        }
        if !path.is_dir() {
            return Err(WatchError::NotADirectory(path.to_owned()));
        }
        config.validate()?;

        let canonical = path.as_std_path().canonicalize()?;
        let watch_path = Utf8PathBuf::from_path_buf(canonical).map_err(WatchError::NonUtf8Path)?;
        let source = NotifySource::arm(&watch_path, ChangeMask::CONTENT, config.recursive)?;

        Self::from_source(source, config, cancel).await
    }

    /// Starts the supervision loop over an already armed source.
    ///
    /// The source's path is what notifications carry.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Config`] if the configuration is invalid.
    #[allow(clippy::unused_async)] // Async so spawning always happens inside a runtime
    pub async fn from_source<S: ChangeSource>(
        source: S,
        config: &WatchConfig,
        cancel: CancellationToken,
    ) -> Result<Self, WatchError> {
        config.validate()?;

        let watch_path = source.path().to_owned();
        let (notification_tx, notification_rx) = mpsc::channel(config.channel_capacity);

        let supervisor = Supervisor {
            gate: DebounceGate::new(config.min_interval()),
            trailing_delay: config.trailing_delay(),
            notification_tx,
            cancel: cancel.clone(),
        };
        let task_handle = tokio::spawn(supervisor.run(source));

        Ok(Self {
            cancel,
            task_handle: Some(task_handle),
            notification_rx,
            watch_path,
            config: *config,
        })
    }

    /// Receives the next notification.
    ///
    /// Returns `None` once the watcher has stopped and every notification
    /// scheduled before that has been drained.
    pub async fn recv(&mut self) -> Option<Notification> {
        self.notification_rx.recv().await
    }

    /// Tries to receive a notification without waiting.
    pub fn try_recv(&mut self) -> Result<Notification, mpsc::error::TryRecvError> {
        self.notification_rx.try_recv()
    }

    /// Returns a mutable reference to the notification receiver.
    ///
    /// This is useful with `tokio::select!`.
    pub fn notifications(&mut self) -> &mut mpsc::Receiver<Notification> {
        &mut self.notification_rx
    }

    /// Returns the directory being watched.
    #[must_use]
    pub fn watch_path(&self) -> &Utf8Path {
        &self.watch_path
    }

    /// Returns the configuration the watcher was started with.
    #[must_use]
    pub const fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Returns a clone of the watcher's cancellation token.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns `true` while the supervision loop is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && self.task_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the watcher and returns how the supervision loop ended.
    ///
    /// Pending notifications are discarded.
    ///
    /// # Errors
    ///
    /// Returns the [`WatchError::Notify`] that terminated the loop, if it
    /// died before shutdown, or [`WatchError::Join`] if the task panicked.
    pub async fn shutdown(mut self) -> Result<(), WatchError> {
        self.cancel.cancel();

        if let Some(handle) = self.task_handle.take() {
            handle.await??;
        }

        Ok(())
    }
}

impl Drop for DebouncedWatcher {
    fn drop(&mut self) {
        // The loop and its delay units observe the token and exit on their own.
        self.cancel.cancel();
    }
}

/// State owned by the supervision loop.
struct Supervisor {
    gate: DebounceGate,
    trailing_delay: Duration,
    notification_tx: mpsc::Sender<Notification>,
    cancel: CancellationToken,
}

impl Supervisor {
    /// Runs until the source fails or the token is cancelled.
    async fn run<S: ChangeSource>(mut self, mut source: S) -> Result<(), WatchError> {
        let path = source.path().to_owned();
        info!(path = %path, "Directory watcher started");

        loop {
            let result = tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    info!(path = %path, "Directory watcher stopped");
                    return Ok(());
                }
                result = source.wait_next() => result,
            };

            let change = match result {
                Ok(change) => change,
                Err(error) => {
                    error!(path = %path, error = %error, "Change source failed, watcher stopping");
                    return Err(error);
                }
            };

            if self.gate.admit(change.at) {
                debug!(
                    path = %path,
                    delay_ms = self.trailing_delay.as_millis(),
                    "Debounce window opened"
                );
                self.schedule(Notification::new(path.clone(), change.at));
            } else {
                trace!(path = %path, "Change absorbed by open debounce window");
            }
        }
    }

    /// Spawns a delay unit that delivers `notification` once the trailing
    /// delay after its triggering change has elapsed.
    fn schedule(&self, notification: Notification) {
        let deliver_at: Instant = notification.triggered_at + self.trailing_delay;
        let tx = self.notification_tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let deliver = async {
                tokio::time::sleep_until(deliver_at).await;
                tx.send(notification).await
            };

            tokio::select! {
                biased;
                () = cancel.cancelled() => trace!("Pending notification discarded"),
                result = deliver => {
                    if result.is_err() {
                        debug!("Notification channel closed, dropping notification");
                    }
                }
            }
        });
    }
}
