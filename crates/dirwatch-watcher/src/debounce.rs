//! Debounce window gate.
//!
//! The gate decides whether a raw change opens a new debounce window. The
//! window is measured from the last *scheduled* notification, not from the
//! last raw change, so a steady stream of changes spaced closer than the
//! interval still produces a notification once per interval.

use std::time::Duration;

use tokio::time::Instant;

/// Decides which raw changes open a new debounce window.
///
/// Owned exclusively by the supervision loop; never shared.
///
/// # Examples
///
/// ```
/// use dirwatch_watcher::DebounceGate;
/// use std::time::Duration;
/// use tokio::time::Instant;
///
/// let mut gate = DebounceGate::new(Duration::from_millis(100));
/// let t0 = Instant::now();
///
/// assert!(gate.admit(t0));
/// assert!(!gate.admit(t0 + Duration::from_millis(90)));
/// assert!(gate.admit(t0 + Duration::from_millis(150)));
/// ```
#[derive(Debug, Clone)]
pub struct DebounceGate {
    min_interval: Duration,
    last_emit: Option<Instant>,
}

impl DebounceGate {
    /// Creates a gate that has not scheduled anything yet.
    ///
    /// The first change it sees always opens a window.
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_emit: None,
        }
    }

    /// Returns `true` and records `now` if more than the minimum interval has
    /// passed since the last admitted change.
    ///
    /// A change exactly `min_interval` after the last admitted one is absorbed.
    pub fn admit(&mut self, now: Instant) -> bool {
        let open = self
            .last_emit
            .is_none_or(|last| now.saturating_duration_since(last) > self.min_interval);
        if open {
            self.last_emit = Some(now);
        }
        open
    }

    /// Returns the instant of the last admitted change.
    #[inline]
    #[must_use]
    pub const fn last_emit(&self) -> Option<Instant> {
        self.last_emit
    }

    /// Returns the configured minimum interval.
    #[inline]
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_first_change_always_admitted() {
        let mut gate = DebounceGate::new(MS * 100);
        let t0 = Instant::now();
        assert!(gate.last_emit().is_none());
        assert!(gate.admit(t0));
        assert_eq!(gate.last_emit(), Some(t0));
    }

    #[test]
    fn test_burst_is_absorbed() {
        let mut gate = DebounceGate::new(MS * 100);
        let t0 = Instant::now();
        assert!(gate.admit(t0));
        for offset in [30, 60, 90] {
            assert!(!gate.admit(t0 + MS * offset));
        }
        // Absorbed changes do not move the window.
        assert_eq!(gate.last_emit(), Some(t0));
    }

    #[test]
    fn test_exact_interval_is_absorbed() {
        let mut gate = DebounceGate::new(MS * 100);
        let t0 = Instant::now();
        assert!(gate.admit(t0));
        assert!(!gate.admit(t0 + MS * 100));
        assert!(gate.admit(t0 + MS * 101));
    }

    #[test]
    fn test_window_measured_from_last_admitted() {
        let mut gate = DebounceGate::new(MS * 100);
        let t0 = Instant::now();
        assert!(gate.admit(t0));
        assert!(!gate.admit(t0 + MS * 80));
        // 160ms after the first admit but only 80ms after the absorbed change.
        assert!(gate.admit(t0 + MS * 160));
        assert_eq!(gate.last_emit(), Some(t0 + MS * 160));
    }

    #[test]
    fn test_zero_interval_admits_distinct_instants() {
        let mut gate = DebounceGate::new(Duration::ZERO);
        let t0 = Instant::now();
        assert!(gate.admit(t0));
        assert!(!gate.admit(t0));
        assert!(gate.admit(t0 + MS));
    }

    #[test]
    fn test_min_interval_accessor() {
        let gate = DebounceGate::new(MS * 250);
        assert_eq!(gate.min_interval(), MS * 250);
    }
}
