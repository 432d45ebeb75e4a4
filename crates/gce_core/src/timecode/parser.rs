//! Timecode string parsing.

use std::str::FromStr;

use super::types::{Timecode, TimecodeError, TimecodeResult};

impl Timecode {
    /// Parse a timecode out of `input`.
    ///
    /// The first `HH:MM:SS:FF` / `HH:MM:SS;FF` pattern found anywhere in
    /// the input is used, so probe output with surrounding text parses
    /// directly. Fails with [`TimecodeError::InvalidFormat`] when no
    /// pattern is present; no partial value is ever produced.
    pub fn parse(input: &str) -> TimecodeResult<Self> {
        scan(input.as_bytes()).ok_or_else(|| TimecodeError::invalid_format(input.trim()))
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Width of the "HH:MM:SS:FF" pattern.
const PATTERN_LEN: usize = 11;

/// Find the first timecode pattern in `bytes`.
fn scan(bytes: &[u8]) -> Option<Timecode> {
    if bytes.len() < PATTERN_LEN {
        return None;
    }
    (0..=bytes.len() - PATTERN_LEN).find_map(|start| match_at(&bytes[start..start + PATTERN_LEN]))
}

/// Try to read the pattern from an 11-byte window.
fn match_at(w: &[u8]) -> Option<Timecode> {
    if w[2] != b':' || w[5] != b':' {
        return None;
    }
    let sep = w[8];
    if sep != b':' && sep != b';' {
        return None;
    }
    Some(Timecode {
        hours: two_digits(w[0], w[1])?,
        minutes: two_digits(w[3], w[4])?,
        seconds: two_digits(w[6], w[7])?,
        frames: two_digits(w[9], w[10])?,
        drop_frame: sep == b';',
    })
}

fn two_digits(a: u8, b: u8) -> Option<u32> {
    if a.is_ascii_digit() && b.is_ascii_digit() {
        Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn parses_colon_separated_timecode() {
        let tc = Timecode::parse("11:49:22:30").unwrap();
        assert_eq!(tc.hours, 11);
        assert_eq!(tc.minutes, 49);
        assert_eq!(tc.seconds, 22);
        assert_eq!(tc.frames, 30);
        assert!(!tc.drop_frame);
    }

    #[test]
    fn parses_drop_frame_separator() {
        let tc = Timecode::parse("11:49:22;30").unwrap();
        assert_eq!(tc.frames, 30);
        assert!(tc.drop_frame);
    }

    #[test]
    fn anchor_for_frame_30_is_half_second() {
        let tc = Timecode::parse("11:49:22:30").unwrap();
        assert_eq!(
            tc.to_clock_time(),
            NaiveTime::from_hms_milli_opt(11, 49, 22, 500).unwrap()
        );
    }

    #[test]
    fn missing_frame_field_is_rejected() {
        let err = Timecode::parse("11:49:22").unwrap_err();
        assert!(matches!(err, TimecodeError::InvalidFormat { .. }));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Timecode::parse("not a timecode").is_err());
        assert!(Timecode::parse("").is_err());
    }

    #[test]
    fn pattern_is_found_inside_surrounding_text() {
        let tc = Timecode::parse("tag:timecode=11:49:22:30\n").unwrap();
        assert_eq!(tc.hours, 11);
        assert_eq!(tc.frames, 30);
    }

    #[test]
    fn frame_counts_past_the_nominal_rate_are_accepted() {
        // Not range checked on purpose; the fraction carries past 1s.
        let tc = Timecode::parse("10:00:00:75").unwrap();
        assert_eq!(tc.frames, 75);
        assert!(tc.total_seconds() > 36_001.0);
    }

    #[test]
    fn from_str_round_trips_display() {
        let tc: Timecode = "04:05:06;07".parse().unwrap();
        assert_eq!(tc.to_string(), "04:05:06;07");
    }
}
