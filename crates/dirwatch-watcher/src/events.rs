//! Event types flowing through the watcher.
//!
//! # Event Flow
//!
//! ```text
//! Filesystem change
//!        │
//!        ▼
//! ChangeSource::wait_next()  ──►  RawChange (arrival instant only)
//!        │
//!        ▼
//! DebounceGate::admit()      ──►  dropped if inside an open window
//!        │
//!        ▼
//! delay unit (trailing delay)
//!        │
//!        ▼
//! Notification sent on the consumer channel
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use tokio::time::Instant;

/// A raw, unthrottled change signal from a [`ChangeSource`].
///
/// Carries no payload beyond the instant it was observed. The source does not
/// know which file changed, only that something relevant did.
///
/// [`ChangeSource`]: crate::ChangeSource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawChange {
    /// Monotonic instant at which the change was observed.
    pub at: Instant,
}

impl RawChange {
    /// Creates a raw change observed now.
    #[inline]
    #[must_use]
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }

    /// Creates a raw change observed at a specific instant.
    #[inline]
    #[must_use]
    pub const fn at(at: Instant) -> Self {
        Self { at }
    }
}

/// A debounced change notification delivered to the consumer.
///
/// Means "a burst of changes happened in `path` and has had time to settle".
///
/// # Examples
///
/// ```
/// use dirwatch_watcher::Notification;
/// use camino::Utf8PathBuf;
/// use tokio::time::Instant;
///
/// let notification = Notification::new(Utf8PathBuf::from("/srv/data"), Instant::now());
/// assert_eq!(notification.path.as_str(), "/srv/data");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The watched directory.
    pub path: Utf8PathBuf,

    /// Instant of the raw change that opened this debounce window.
    ///
    /// Notifications arrive in non-decreasing order of this field.
    pub triggered_at: Instant,
}

impl Notification {
    /// Creates a notification for `path` whose window opened at `triggered_at`.
    #[inline]
    #[must_use]
    pub const fn new(path: Utf8PathBuf, triggered_at: Instant) -> Self {
        Self { path, triggered_at }
    }

    /// Returns the watched directory.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Consumes the notification, returning the watched directory.
    #[inline]
    #[must_use]
    pub fn into_path(self) -> Utf8PathBuf {
        self.path
    }
}
