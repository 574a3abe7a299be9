//! Raw change sources.
//!
//! A [`ChangeSource`] wraps one OS directory-change notification primitive
//! bound to one directory. It only answers "did something relevant change?";
//! it never says which file changed.
//!
//! [`NotifySource`] is the production implementation. It is backed by the
//! `notify` crate, which picks inotify, FSEvents, kqueue or
//! `ReadDirectoryChangesW` for the current platform. The supervision loop in
//! [`crate::watcher`] depends only on the trait.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use bitflags::bitflags;
use camino::{Utf8Path, Utf8PathBuf};
use notify::event::{CreateKind, DataChange, MetadataKind, ModifyKind, RemoveKind};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::WatchError;
use crate::events::RawChange;

bitflags! {
    /// Categories of filesystem change a source can be armed for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeMask: u8 {
        /// A file was created.
        const CREATION = 1 << 0;
        /// A file was added, removed or renamed.
        const FILE_NAME = 1 << 1;
        /// File contents were written.
        const LAST_WRITE = 1 << 2;
        /// File size changed.
        const SIZE = 1 << 3;
        /// Attribute-only change (extended attributes, flags).
        const ATTRIBUTES = 1 << 4;
        /// A directory was added, removed or renamed.
        const DIR_NAME = 1 << 5;
        /// A file was read or its access time touched.
        const LAST_ACCESS = 1 << 6;
        /// Permissions or ownership changed.
        const SECURITY = 1 << 7;

        /// Content-relevant changes only. This is what the watcher arms for.
        const CONTENT = Self::CREATION.bits()
            | Self::FILE_NAME.bits()
            | Self::LAST_WRITE.bits()
            | Self::SIZE.bits();
    }
}

impl Default for ChangeMask {
    fn default() -> Self {
        Self::CONTENT
    }
}

impl ChangeMask {
    /// Maps a `notify` event kind onto the categories it represents.
    ///
    /// Kinds the backend cannot classify further are treated as writes.
    #[must_use]
    pub const fn classify(kind: &EventKind) -> Self {
        match kind {
            EventKind::Any => Self::LAST_WRITE,
            EventKind::Access(_) => Self::LAST_ACCESS,
            EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => {
                Self::DIR_NAME
            }
            EventKind::Create(_) => Self::CREATION.union(Self::FILE_NAME),
            EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_)) => Self::FILE_NAME,
            EventKind::Modify(ModifyKind::Data(DataChange::Size)) => {
                Self::SIZE.union(Self::LAST_WRITE)
            }
            EventKind::Modify(ModifyKind::Metadata(metadata)) => match metadata {
                MetadataKind::WriteTime => Self::LAST_WRITE,
                MetadataKind::AccessTime => Self::LAST_ACCESS,
                MetadataKind::Permissions | MetadataKind::Ownership => Self::SECURITY,
                MetadataKind::Any | MetadataKind::Extended | MetadataKind::Other => {
                    Self::ATTRIBUTES
                }
            },
            EventKind::Modify(_) => Self::LAST_WRITE,
            EventKind::Other => Self::empty(),
        }
    }

    /// Returns `true` if an event of `kind` passes this mask.
    #[inline]
    #[must_use]
    pub const fn accepts(self, kind: &EventKind) -> bool {
        self.intersects(Self::classify(kind))
    }

    /// Maps a whole `notify` event, including its flags.
    ///
    /// A rescan flag means the backend dropped events and cannot say what
    /// changed, so it counts as a write whatever the kind says.
    #[must_use]
    pub fn classify_event(event: &notify::Event) -> Self {
        let kinds = Self::classify(&event.kind);
        if event.need_rescan() {
            kinds.union(Self::LAST_WRITE)
        } else {
            kinds
        }
    }

    /// Returns `true` if `event` passes this mask.
    #[inline]
    #[must_use]
    pub fn accepts_event(self, event: &notify::Event) -> bool {
        self.intersects(Self::classify_event(event))
    }
}

/// Decides whether a backend event should wake the waiting source.
///
/// Removing or renaming the watched root always wakes it, whatever the mask,
/// so that the following rearm can notice the directory is gone.
fn is_relevant(event: &notify::Event, mask: ChangeMask, root: &Path) -> bool {
    if mask.accepts_event(event) {
        return true;
    }
    matches!(
        event.kind,
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    ) && event.paths.iter().any(|path| path == root)
}

/// A single OS-level directory-change notification primitive.
///
/// The contract mirrors the native APIs it abstracts: a source is armed at
/// construction, [`wait`](Self::wait) suspends until the OS signals a change,
/// and [`rearm`](Self::rearm) must succeed before the next wait can observe
/// anything. [`wait_next`](Self::wait_next) performs both steps and is what
/// the supervision loop calls.
///
/// Implementations must be cancel-safe at `wait`: dropping the future before
/// it completes must not lose an already-signalled change.
pub trait ChangeSource: Send + 'static {
    /// Returns the directory this source is bound to.
    fn path(&self) -> &Utf8Path;

    /// Suspends until at least one relevant change has been signalled.
    fn wait(&mut self) -> impl Future<Output = Result<(), WatchError>> + Send;

    /// Re-arms the source after a successful wait.
    ///
    /// A source that is not re-armed stops delivering changes.
    fn rearm(&mut self) -> Result<(), WatchError>;

    /// Waits for the next change, re-arms, and returns the raw change.
    fn wait_next(&mut self) -> impl Future<Output = Result<RawChange, WatchError>> + Send {
        async move {
            self.wait().await?;
            let change = RawChange::now();
            self.rearm()?;
            Ok(change)
        }
    }
}

/// State shared between the notify callback thread and the source.
#[derive(Debug, Default)]
struct Signal {
    /// Holds at most one pending wake-up, so bursts coalesce.
    pending: Notify,
    /// First backend error seen since the last wait.
    fault: Mutex<Option<notify::Error>>,
}

/// A [`ChangeSource`] backed by the platform's recommended `notify` watcher.
///
/// The notify callback runs on the backend's own thread. Relevant events
/// set a single pending flag; everything else is ignored there.
pub struct NotifySource {
    root: Utf8PathBuf,
    mask: ChangeMask,
    signal: Arc<Signal>,
    // Dropping the watcher tears down the OS registration.
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for NotifySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifySource")
            .field("root", &self.root)
            .field("mask", &self.mask)
            .finish_non_exhaustive()
    }
}

impl NotifySource {
    /// Arms change notification for `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - The directory to watch
    /// * `mask` - Categories of change that count as relevant
    /// * `recursive` - Whether subdirectories are covered
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::ArmFailed`] if the backend cannot be created or
    /// refuses to watch `root`.
    pub fn arm(root: &Utf8Path, mask: ChangeMask, recursive: bool) -> Result<Self, WatchError> {
        let signal = Arc::new(Signal::default());
        let callback_signal = Arc::clone(&signal);
        let watched_root = root.as_std_path().to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    if is_relevant(&event, mask, &watched_root) {
                        tracing::trace!(kind = ?event.kind, "Relevant change signalled");
                        callback_signal.pending.notify_one();
                    }
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Change notification backend error");
                    let mut fault = callback_signal.fault.lock();
                    if fault.is_none() {
                        *fault = Some(error);
                    }
                    drop(fault);
                    callback_signal.pending.notify_one();
                }
            }
        })
        .map_err(|e| WatchError::arm_failed(root, e))?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(root.as_std_path(), mode)
            .map_err(|e| WatchError::arm_failed(root, e))?;

        tracing::debug!(path = %root, recursive, ?mask, "Change notification armed");

        Ok(Self {
            root: root.to_owned(),
            mask,
            signal,
            _watcher: watcher,
        })
    }

    /// Returns the mask this source was armed with.
    #[inline]
    #[must_use]
    pub const fn mask(&self) -> ChangeMask {
        self.mask
    }
}

impl ChangeSource for NotifySource {
    fn path(&self) -> &Utf8Path {
        &self.root
    }

    fn wait(&mut self) -> impl Future<Output = Result<(), WatchError>> + Send {
        async move {
            self.signal.pending.notified().await;
            let fault = self.signal.fault.lock().take();
            match fault {
                Some(error) => Err(WatchError::from_notify(&error)),
                None => Ok(()),
            }
        }
    }

    fn rearm(&mut self) -> Result<(), WatchError> {
        // The OS registration persists across events, but it silently stops
        // reporting once the watched directory itself is gone.
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(WatchError::notify(
                None,
                format!("watched directory is gone: {}", self.root),
            ))
        }
    }
}
