//! Nullable clock: deterministic time for testing.

use stakeable_types::{Clock, Timestamp, SECS_PER_HOUR};
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to. Interior mutability lets a test
/// move time forward while an engine holds the clock.
#[derive(Debug, Default)]
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
    }

    /// Advance time by whole hours.
    pub fn advance_hours(&self, hours: u64) {
        self.advance(hours * SECS_PER_HOUR);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(100);
        assert_eq!(clock.now(), Timestamp::new(100));
        clock.advance(5);
        clock.advance_hours(1);
        assert_eq!(clock.now(), Timestamp::new(3_705));
        clock.set(7);
        assert_eq!(clock.now(), Timestamp::new(7));
    }
}
