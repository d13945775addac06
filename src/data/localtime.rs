//! Conversion of backend timestamps to the viewer's wall clock.
//!
//! The backend serves RFC 3339 timestamps. Charts plot them shifted to the
//! viewer's local time, formatted back into an ISO 8601 string that keeps a
//! trailing `Z` (the plotting surface treats x values as opaque labels).
//!
//! The UTC offset is captured once when the clock is created and applied to
//! every sample. Samples on the far side of a DST transition therefore get
//! the wrong wall-clock hour; see `offset_is_captured_once_so_dst_shifts_drift`
//! below.

use chrono::{DateTime, Duration, Local, Offset, SecondsFormat};

/// Converts source timestamps to the viewer's wall-clock representation.
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    /// Seconds east of UTC, captured at construction.
    offset_seconds: i32,
}

impl LocalClock {
    /// Capture the current local UTC offset.
    pub fn system() -> Self {
        Self {
            offset_seconds: Local::now().offset().fix().local_minus_utc(),
        }
    }

    /// A clock with a fixed offset, for tests and non-interactive use.
    pub fn fixed(offset_seconds: i32) -> Self {
        Self { offset_seconds }
    }

    /// Shift an RFC 3339 timestamp by the captured offset.
    ///
    /// Unparseable input is returned unchanged; a bad sample degrades to a
    /// bad label rather than failing the whole render.
    pub fn to_local_time(&self, timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(parsed) => {
                let shifted = parsed.to_utc() + Duration::seconds(self.offset_seconds.into());
                shifted.to_rfc3339_opts(SecondsFormat::Millis, true)
            }
            Err(_) => timestamp.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_by_the_captured_offset() {
        // UTC-5 (e.g. US Eastern standard time)
        let clock = LocalClock::fixed(-5 * 3600);
        assert_eq!(
            clock.to_local_time("2023-01-15T12:00:00Z"),
            "2023-01-15T07:00:00.000Z"
        );

        // UTC+2
        let clock = LocalClock::fixed(2 * 3600);
        assert_eq!(
            clock.to_local_time("2023-01-15T12:00:00Z"),
            "2023-01-15T14:00:00.000Z"
        );
    }

    #[test]
    fn source_offsets_are_normalized_before_shifting() {
        let clock = LocalClock::fixed(-5 * 3600);
        // +07:00 source timestamp, same instant as 05:00 UTC.
        assert_eq!(
            clock.to_local_time("2023-01-15T12:00:00+07:00"),
            "2023-01-15T00:00:00.000Z"
        );
    }

    #[test]
    fn conversion_is_deterministic_for_a_fixed_offset() {
        let clock = LocalClock::fixed(-8 * 3600);
        let a = clock.to_local_time("2023-03-01T00:30:00Z");
        let b = clock.to_local_time("2023-03-01T00:30:00Z");
        assert_eq!(a, b);
    }

    #[test]
    fn unparseable_input_is_passed_through() {
        let clock = LocalClock::fixed(0);
        assert_eq!(clock.to_local_time("not-a-date"), "not-a-date");
    }

    #[test]
    fn offset_is_captured_once_so_dst_shifts_drift() {
        // Viewer in US Eastern, clock created during standard time (UTC-5).
        let clock = LocalClock::fixed(-5 * 3600);

        // 2023-07-15 12:00 UTC falls in daylight time, when Eastern is
        // UTC-4. The correct wall clock there is 08:00.
        let converted = clock.to_local_time("2023-07-15T12:00:00Z");
        let correct_wall_clock = "2023-07-15T08:00:00.000Z";

        // The captured winter offset is applied instead, landing an hour
        // early. This documents the preserved defect.
        assert_eq!(converted, "2023-07-15T07:00:00.000Z");
        assert_ne!(converted, correct_wall_clock);
    }
}
