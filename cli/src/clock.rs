//! Clock used by the binary: wall time, or a fixed instant from `--at`.

use stakeable_types::{Clock, SystemClock, Timestamp};

#[derive(Clone, Copy, Debug)]
pub enum CliClock {
    System(SystemClock),
    Fixed(Timestamp),
}

impl CliClock {
    pub fn from_arg(at: Option<u64>) -> Self {
        match at {
            Some(secs) => Self::Fixed(Timestamp::new(secs)),
            None => Self::System(SystemClock),
        }
    }
}

impl Clock for CliClock {
    fn now(&self) -> Timestamp {
        match self {
            Self::System(clock) => clock.now(),
            Self::Fixed(at) => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_clock_does_not_move() {
        let clock = CliClock::from_arg(Some(1_600_000_000));
        assert_eq!(clock.now(), Timestamp::new(1_600_000_000));
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn no_pin_reads_wall_time() {
        let clock = CliClock::from_arg(None);
        assert!(clock.now().as_secs() > 1_600_000_000);
    }
}
