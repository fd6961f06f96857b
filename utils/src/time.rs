//! Human-facing time formatting.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Format a duration using its two largest units, e.g. `"23h 59m"`.
pub fn format_duration(secs: u64) -> String {
    match secs {
        s if s < MINUTE => format!("{s}s"),
        s if s < HOUR => format!("{}m {}s", s / MINUTE, s % MINUTE),
        s if s < DAY => format!("{}h {}m", s / HOUR, (s % HOUR) / MINUTE),
        s => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
    }
}

/// Countdown to an unlock instant, both in Unix seconds.
pub fn format_countdown(now: u64, unlock_at: u64) -> String {
    match unlock_at.checked_sub(now) {
        Some(remaining) if remaining > 0 => format!("unlocks in {}", format_duration(remaining)),
        _ => "unlocked".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_two_largest_units() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(23 * HOUR + 59 * MINUTE), "23h 59m");
        assert_eq!(format_duration(DAY + HOUR), "1d 1h");
    }

    #[test]
    fn countdown_reaches_unlocked_at_the_deadline() {
        assert_eq!(format_countdown(0, DAY), "unlocks in 1d 0h");
        assert_eq!(format_countdown(DAY - 30, DAY), "unlocks in 30s");
        assert_eq!(format_countdown(DAY, DAY), "unlocked");
        assert_eq!(format_countdown(DAY + 1, DAY), "unlocked");
    }
}
