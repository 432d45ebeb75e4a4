//! Timecode value type and errors.

use chrono::NaiveTime;

/// Nominal frame rate used for the frame-to-fraction conversion.
///
/// The source cameras record at ~60 fps; the timecode track counts frames
/// against that rate regardless of the actual capture rate.
pub const NOMINAL_FPS: f64 = 60.0;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// A device timecode: hours, minutes, seconds and a frame count at the
/// nominal rate.
///
/// Components are carried exactly as parsed. No component is range
/// checked: the devices emit frame counts at (and occasionally past) the
/// nominal rate boundary, and a count of e.g. 61 simply contributes more
/// than one second of carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timecode {
    /// Hours component.
    pub hours: u32,
    /// Minutes component.
    pub minutes: u32,
    /// Seconds component.
    pub seconds: u32,
    /// Frame count at [`NOMINAL_FPS`].
    pub frames: u32,
    /// Whether the source used the `;` drop-frame separator. Parsed for
    /// fidelity only; the conversion math is identical.
    pub drop_frame: bool,
}

impl Timecode {
    /// Total seconds of day including the fractional frame contribution.
    pub fn total_seconds(&self) -> f64 {
        f64::from(self.hours * 3600 + self.minutes * 60 + self.seconds)
            + f64::from(self.frames) / NOMINAL_FPS
    }

    /// The time-of-day anchor this timecode denotes.
    ///
    /// The date component is irrelevant to offset arithmetic, so only a
    /// time of day is produced; values past 24h wrap around midnight.
    pub fn to_clock_time(&self) -> NaiveTime {
        // Integer nanoseconds keep frame fractions exact (30 frames is
        // exactly half a second, never 0.4999...).
        let frame_nanos = u64::from(self.frames) * 1_000_000_000 / NOMINAL_FPS as u64;
        let carry_secs = frame_nanos / 1_000_000_000;
        let nanos = (frame_nanos % 1_000_000_000) as u32;

        let total_secs = u64::from(self.hours) * 3600
            + u64::from(self.minutes) * 60
            + u64::from(self.seconds)
            + carry_secs;
        let wrapped = (total_secs % SECS_PER_DAY) as u32;

        // Both arguments are in range after the wrap, so this cannot fail.
        NaiveTime::from_num_seconds_from_midnight_opt(wrapped, nanos)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl std::fmt::Display for Timecode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = if self.drop_frame { ';' } else { ':' };
        write!(
            f,
            "{:02}:{:02}:{:02}{}{:02}",
            self.hours, self.minutes, self.seconds, sep, self.frames
        )
    }
}

/// Errors from timecode parsing.
#[derive(Debug, thiserror::Error)]
pub enum TimecodeError {
    /// The input did not contain an HH:MM:SS:FF / HH:MM:SS;FF pattern.
    #[error("invalid timecode format: {value:?} (expected HH:MM:SS:FF or HH:MM:SS;FF)")]
    InvalidFormat {
        /// The rejected input.
        value: String,
    },
}

impl TimecodeError {
    /// Create an InvalidFormat error.
    pub fn invalid_format(value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            value: value.into(),
        }
    }
}

/// Result type for timecode operations.
pub type TimecodeResult<T> = Result<T, TimecodeError>;
