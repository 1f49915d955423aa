//! Monotonic-to-civil time conversion
//!
//! Trades carry monotonic stamps, which cannot be formatted directly. The
//! writer captures one (wall, monotonic) anchor pair at start and derives
//! every civil timestamp from that single offset, so all log lines share
//! one consistent calibration.

use chrono::{DateTime, Local};
use std::time::{Instant, SystemTime};

/// One-shot calibration between the monotonic clock and the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    anchor_system: SystemTime,
    anchor_instant: Instant,
}

impl WallClock {
    /// Capture the calibration pair now
    pub fn calibrate() -> Self {
        Self {
            anchor_system: SystemTime::now(),
            anchor_instant: Instant::now(),
        }
    }

    /// Project a monotonic stamp onto the wall clock
    pub fn wall_time(&self, at: Instant) -> SystemTime {
        if at >= self.anchor_instant {
            self.anchor_system + (at - self.anchor_instant)
        } else {
            self.anchor_system - (self.anchor_instant - at)
        }
    }

    /// Local civil time at second resolution: `YYYY-MM-DD HH:MM:SS`
    pub fn format_local(&self, at: Instant) -> String {
        let local: DateTime<Local> = self.wall_time(at).into();
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn looks_like_civil_time(s: &str) -> bool {
        let bytes = s.as_bytes();
        s.len() == 19
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes[10] == b' '
            && bytes[13] == b':'
            && bytes[16] == b':'
            && s.chars().filter(|c| c.is_ascii_digit()).count() == 14
    }

    #[test]
    fn test_format_shape() {
        let clock = WallClock::calibrate();
        let formatted = clock.format_local(Instant::now());
        assert!(
            looks_like_civil_time(&formatted),
            "unexpected format: {formatted}"
        );
    }

    #[test]
    fn test_stamps_before_anchor() {
        let earlier = Instant::now();
        std::thread::sleep(Duration::from_millis(5));
        let clock = WallClock::calibrate();

        let wall_earlier = clock.wall_time(earlier);
        let wall_later = clock.wall_time(Instant::now());
        assert!(wall_earlier < wall_later);
    }

    #[test]
    fn test_offsets_preserved() {
        let clock = WallClock::calibrate();
        let base = Instant::now();
        let later = base + Duration::from_secs(90);

        let delta = clock
            .wall_time(later)
            .duration_since(clock.wall_time(base))
            .unwrap();
        assert_eq!(delta, Duration::from_secs(90));
    }
}
