//! Tick conversion and the timestamp header wire format.
//!
//! A tick is a 100 ns interval counted from 0001-01-01T00:00:00Z. The decimal
//! tick count of the request instant is the message that gets hashed; the
//! formatted instant is what travels in the timestamp header.

use chrono::{DateTime, SubsecRound, Utc};
use std::fmt;
use std::str::FromStr;

/// Ticks per second (one tick is 100 ns).
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Tick count of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

const NANOS_PER_TICK: u32 = 100;

/// Largest representable tick count, 9999-12-31T23:59:59.9999999Z.
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

/// Convert an instant to its tick count.
///
/// Sub-tick nanoseconds are dropped. Returns `None` for instants outside
/// 0001-01-01T00:00:00Z..=9999-12-31T23:59:59.9999999Z.
pub fn to_ticks(instant: &DateTime<Utc>) -> Option<i64> {
    let ticks = instant
        .timestamp()
        .checked_mul(TICKS_PER_SECOND)?
        .checked_add(UNIX_EPOCH_TICKS)?
        .checked_add(i64::from(instant.timestamp_subsec_nanos() / NANOS_PER_TICK))?;
    (0..=MAX_TICKS).contains(&ticks).then_some(ticks)
}

/// Convert a tick count back to an instant.
///
/// Returns `None` if the tick count is outside `0..=MAX_TICKS`.
pub fn from_ticks(ticks: i64) -> Option<DateTime<Utc>> {
    if !(0..=MAX_TICKS).contains(&ticks) {
        return None;
    }
    let since_epoch = ticks - UNIX_EPOCH_TICKS;
    let secs = since_epoch.div_euclid(TICKS_PER_SECOND);
    let sub_ticks = since_epoch.rem_euclid(TICKS_PER_SECOND) as u32;
    DateTime::from_timestamp(secs, sub_ticks * NANOS_PER_TICK)
}

/// Format of the timestamp header value.
///
/// The verifying service parses this header to recompute the ticks, so both
/// sides must agree on the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// Round-trip UTC with seven fractional digits: `2024-03-01T12:00:00.1234567Z`.
    #[default]
    RoundTrip,
    /// Sortable UTC to whole seconds, no offset: `2024-03-01T12:00:00`.
    Sortable,
}

impl TimestampFormat {
    /// Truncate an instant to the precision this format can carry.
    ///
    /// Ticks must be computed from the truncated instant, otherwise the
    /// verifier would recompute different ticks from the header.
    pub fn truncate(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::RoundTrip => instant.trunc_subsecs(7),
            Self::Sortable => instant.trunc_subsecs(0),
        }
    }

    /// Render an instant as a header value.
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        let seconds = instant.format("%Y-%m-%dT%H:%M:%S");
        match self {
            Self::RoundTrip => format!(
                "{}.{:07}Z",
                seconds,
                instant.timestamp_subsec_nanos() / NANOS_PER_TICK
            ),
            Self::Sortable => seconds.to_string(),
        }
    }
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundTrip => write!(f, "round-trip"),
            Self::Sortable => write!(f, "sortable"),
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = ParseTimestampFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "round-trip" | "roundtrip" | "o" => Ok(Self::RoundTrip),
            "sortable" | "s" => Ok(Self::Sortable),
            _ => Err(ParseTimestampFormatError(s.to_string())),
        }
    }
}

/// Error parsing a timestamp format name.
#[derive(Debug, Clone)]
pub struct ParseTimestampFormatError(String);

impl fmt::Display for ParseTimestampFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid timestamp format '{}', expected 'round-trip' or 'sortable'",
            self.0
        )
    }
}

impl std::error::Error for ParseTimestampFormatError {}
