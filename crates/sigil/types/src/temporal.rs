//! Time as the registry sees it.
//!
//! Every timing decision (lockout expiry, token expiry, transfer windows)
//! flows through a [`Clock`] — the registry never reads the wall clock
//! directly. The host environment guarantees a single canonical time per
//! invocation, so one `now()` read at the top of an operation is authoritative
//! for the whole call.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The zero timestamp, used as the "unset" sentinel for lock deadlines
    /// and never-issued keys.
    pub const ZERO: Timestamp = Timestamp(0);

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn secs(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds elapsed since `earlier`; zero if `earlier` is in the future.
    pub const fn elapsed_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Calendar form, when representable.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0 as i64, 0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}s", self.0),
        }
    }
}

/// The current-time oracle.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// Production clock backed by `SystemTime`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Timestamp::from_secs(secs)
    }
}

/// Hand-advanced clock for tests and demos.
///
/// Shared behind an `Arc`, it lets a scenario move time forward while the
/// registry keeps reading the same instance.
#[derive(Debug)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(start.secs()),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, at: Timestamp) {
        self.secs.store(at.secs(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.secs.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_since_saturates_for_future_anchors() {
        let earlier = Timestamp::from_secs(100);
        let later = Timestamp::from_secs(250);
        assert_eq!(later.elapsed_since(earlier), 150);
        assert_eq!(earlier.elapsed_since(later), 0);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Timestamp::from_secs(1_000));
        assert_eq!(clock.now().secs(), 1_000);
        clock.advance(86_401);
        assert_eq!(clock.now().secs(), 87_401);
        clock.set(Timestamp::from_secs(5));
        assert_eq!(clock.now().secs(), 5);
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now().secs() > 0);
    }

    #[test]
    fn serializes_as_bare_seconds() {
        let at = Timestamp::from_secs(86_400);
        assert_eq!(serde_json::to_string(&at).unwrap(), "86400");
        let restored: Timestamp = serde_json::from_str("86400").unwrap();
        assert_eq!(restored, at);
    }

    #[test]
    fn display_renders_rfc3339() {
        let at = Timestamp::from_secs(0);
        assert!(format!("{}", at).starts_with("1970-01-01"));
    }
}
