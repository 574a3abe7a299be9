//! Scripted change source for deterministic timing tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::WatchError;
use crate::source::ChangeSource;

/// One scripted outcome of `wait`, relative to the previous one.
#[derive(Debug, Clone, Copy)]
enum Step {
    Change(Duration),
    Fail(Duration),
}

/// Counters observable after the source has moved into the watcher.
#[derive(Debug, Default)]
pub(crate) struct SourceCounters {
    waits: AtomicUsize,
    rearms: AtomicUsize,
}

impl SourceCounters {
    pub(crate) fn waits(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }

    pub(crate) fn rearms(&self) -> usize {
        self.rearms.load(Ordering::SeqCst)
    }
}

/// A [`ChangeSource`] that replays a fixed script on tokio's clock.
///
/// Once the script is exhausted, `wait` never completes.
#[derive(Debug)]
pub(crate) struct ScriptedSource {
    path: Utf8PathBuf,
    steps: VecDeque<Step>,
    counters: Arc<SourceCounters>,
}

impl ScriptedSource {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: Utf8PathBuf::from(path),
            steps: VecDeque::new(),
            counters: Arc::new(SourceCounters::default()),
        }
    }

    /// Signals a change `ms` after the previous step.
    pub(crate) fn change_after(mut self, ms: u64) -> Self {
        self.steps.push_back(Step::Change(Duration::from_millis(ms)));
        self
    }

    /// Fails `ms` after the previous step.
    pub(crate) fn fail_after(mut self, ms: u64) -> Self {
        self.steps.push_back(Step::Fail(Duration::from_millis(ms)));
        self
    }

    pub(crate) fn counters(&self) -> Arc<SourceCounters> {
        Arc::clone(&self.counters)
    }
}

impl ChangeSource for ScriptedSource {
    fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn wait(&mut self) -> impl Future<Output = Result<(), WatchError>> + Send {
        async move {
            self.counters.waits.fetch_add(1, Ordering::SeqCst);
            match self.steps.pop_front() {
                Some(Step::Change(after)) => {
                    tokio::time::sleep(after).await;
                    Ok(())
                }
                Some(Step::Fail(after)) => {
                    tokio::time::sleep(after).await;
                    Err(WatchError::notify(Some(6), "scripted wait failure"))
                }
                None => std::future::pending().await,
            }
        }
    }

    fn rearm(&mut self) -> Result<(), WatchError> {
        self.counters.rearms.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
