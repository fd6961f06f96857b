//! Timestamp type and the injectable clock.
//!
//! Timestamps are Unix epoch seconds (UTC). Nothing in the staking engine reads
//! wall-clock time directly; it asks a [`Clock`] so that elapsed-time
//! computations are deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one accrual hour.
pub const SECS_PER_HOUR: u64 = 3_600;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whole hours elapsed since this timestamp; partial hours are truncated.
    pub fn whole_hours_since(&self, now: Timestamp) -> u64 {
        self.elapsed_since(now) / SECS_PER_HOUR
    }

    /// This timestamp moved forward by `secs`, or `None` on overflow.
    pub fn checked_add_secs(&self, secs: u64) -> Option<Timestamp> {
        self.0.checked_add(secs).map(Self)
    }

    /// Whether `now` has reached this deadline. The deadline itself counts.
    pub fn is_reached_by(&self, now: Timestamp) -> bool {
        now.0 >= self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch.
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Timestamp(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_hours_truncates_partial_hour() {
        let start = Timestamp::new(1_000);
        assert_eq!(start.whole_hours_since(Timestamp::new(1_000 + 3_599)), 0);
        assert_eq!(start.whole_hours_since(Timestamp::new(1_000 + 3_600)), 1);
        assert_eq!(start.whole_hours_since(Timestamp::new(1_000 + 7_300)), 2);
    }

    #[test]
    fn whole_hours_saturates_when_clock_is_behind() {
        assert_eq!(Timestamp::new(5_000).whole_hours_since(Timestamp::new(10)), 0);
    }

    #[test]
    fn checked_add_secs_detects_overflow() {
        assert_eq!(Timestamp::new(1).checked_add_secs(2), Some(Timestamp::new(3)));
        assert_eq!(Timestamp::new(u64::MAX).checked_add_secs(1), None);
    }

    #[test]
    fn deadline_is_reached_at_the_exact_second() {
        let deadline = Timestamp::new(86_400);
        assert!(!deadline.is_reached_by(Timestamp::new(86_399)));
        assert!(deadline.is_reached_by(Timestamp::new(86_400)));
        assert!(deadline.is_reached_by(Timestamp::new(u64::MAX)));
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now() > Timestamp::EPOCH);
    }
}
