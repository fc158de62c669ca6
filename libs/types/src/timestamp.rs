//! Microsecond-precision timestamp normalization across wire formats.
//!
//! Storage engines and wire formats disagree about three things this
//! module has to reconcile: whether a textual timestamp carries an
//! offset, how many fractional-second digits it carries, and what the
//! "no value" sentinel looks like. [`Timestamp`] folds all of them into
//! one canonical in-memory instant and reproduces each representation on
//! the way out.
//!
//! # Layouts
//!
//! - Column text: `YYYY-MM-DD HH:MM:SS.nnnnnnnnn`, nine fractional
//!   digits, rendered in the configured base zone. Input with fewer
//!   digits is right-padded with zeros before parsing.
//! - Text containing `T`: RFC 3339 with optional fraction and `Z` or
//!   `±HH:MM` offset.
//! - JSON: quoted RFC 3339, or `null` for the zero value.
//! - Binary: fixed 15-byte versioned layout (see [`Timestamp::to_binary`]).
//!
//! # Zero value
//!
//! Engines emit "zero dates" in several spellings (`0000-01-01 …`,
//! `0001-01-01 …`, with or without fraction). Any instant whose calendar
//! year, month, and day are all <= 1 collapses to the single canonical
//! zero (0001-01-01 00:00:00 UTC) at the column boundary. The condition
//! is deliberately this broad; downstream stores rely on it.

use crate::column::ColumnValue;
use crate::error::TimestampError;
use crate::zone::ZoneConfig;
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeDelta, Timelike,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Column layout: date and time with exactly nine fractional digits.
const COLUMN_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

/// Number of fractional digits in the column layout.
const FRACTION_DIGITS: usize = 9;

/// Version tag for the binary encoding.
const BINARY_VERSION: u8 = 1;

/// Encoded size: version, unix seconds, subsecond nanos, offset minutes.
const BINARY_LEN: usize = 1 + 8 + 4 + 2;

/// An absolute instant at microsecond resolution, preserving the UTC
/// offset it was constructed or parsed with.
///
/// Equality, ordering, and hashing compare the instant only, so the same
/// moment expressed in two offsets compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// The current instant in the host's local offset, rounded to
    /// microseconds.
    #[must_use]
    pub fn now() -> Self {
        Self(round_to_micros(Local::now().fixed_offset()))
    }

    /// Builds an instant from calendar fields interpreted in the given
    /// offset, rounded to microseconds.
    ///
    /// Returns `None` if any field is out of range for the calendar.
    #[must_use]
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
        nano: u32,
        offset: FixedOffset,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_nano_opt(hour, min, sec, nano)?;
        let naive = date.and_time(time);
        let dt = DateTime::from_naive_utc_and_offset(naive - offset, offset);
        Some(Self(round_to_micros(dt)))
    }

    /// The canonical zero value: 0001-01-01 00:00:00 UTC.
    #[must_use]
    pub fn zero() -> Self {
        Self(zero_instant())
    }

    /// Returns true if this is the zero value.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == zero_instant()
    }

    /// Returns the inner date-time.
    #[must_use]
    pub const fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Renders the instant in the configured base zone using the column
    /// layout. Cannot fail.
    ///
    /// Instants at or before 0001-01-01 render as the zero sentinel in
    /// UTC, so no base offset shifts the sentinel itself.
    #[must_use]
    pub fn to_column_value(&self, zones: &ZoneConfig) -> ColumnValue {
        let local = self.0.with_timezone(&zones.base());
        let canonical = if is_zero_date(&local) {
            zero_instant()
        } else {
            local
        };
        ColumnValue::Text(canonical.format(COLUMN_FORMAT).to_string())
    }

    /// Accepts a value handed back by a column scan.
    ///
    /// A native instant is used directly. Text containing `T` is parsed
    /// as RFC 3339; any other text uses the column layout interpreted in
    /// the base zone, with the fraction zero-padded to nine digits. Both
    /// text paths round to microseconds. Every other variant is rejected
    /// as an unsupported source.
    pub fn from_column_value(
        value: ColumnValue,
        zones: &ZoneConfig,
    ) -> Result<Self, TimestampError> {
        let parsed = match value {
            ColumnValue::Instant(dt) => dt,
            ColumnValue::Text(text) => round_to_micros(parse_column_text(&text, zones)?),
            other => return Err(TimestampError::UnsupportedSource(other)),
        };
        if is_zero_date(&parsed) {
            Ok(Self::zero())
        } else {
            Ok(Self(parsed))
        }
    }

    /// Encodes the fixed binary layout: `[version u8][unix seconds
    /// i64 BE][subsecond nanos u32 BE][offset minutes i16 BE]`.
    #[must_use]
    pub fn to_binary(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(BINARY_LEN);
        buf.push(BINARY_VERSION);
        buf.extend_from_slice(&self.0.timestamp().to_be_bytes());
        buf.extend_from_slice(&self.0.timestamp_subsec_nanos().to_be_bytes());
        let offset_minutes = (self.0.offset().local_minus_utc() / 60) as i16;
        buf.extend_from_slice(&offset_minutes.to_be_bytes());
        buf
    }

    /// Decodes the fixed binary layout produced by [`to_binary`].
    ///
    /// [`to_binary`]: Timestamp::to_binary
    pub fn from_binary(data: &[u8]) -> Result<Self, TimestampError> {
        if data.len() != BINARY_LEN {
            return Err(TimestampError::BinaryLength {
                expected: BINARY_LEN,
                actual: data.len(),
            });
        }
        if data[0] != BINARY_VERSION {
            return Err(TimestampError::BinaryVersion(data[0]));
        }
        let secs = i64::from_be_bytes(data[1..9].try_into().expect("slice has fixed length"));
        let nanos = u32::from_be_bytes(data[9..13].try_into().expect("slice has fixed length"));
        let offset_minutes =
            i16::from_be_bytes(data[13..15].try_into().expect("slice has fixed length"));

        let offset = FixedOffset::east_opt(i32::from(offset_minutes) * 60)
            .ok_or(TimestampError::BinaryOutOfRange)?;
        let utc = DateTime::from_timestamp(secs, nanos).ok_or(TimestampError::BinaryOutOfRange)?;
        Ok(Self(utc.with_timezone(&offset)))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(DateTime::parse_from_rfc3339(s)?))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_zero() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::zero()),
            Some(text) => DateTime::parse_from_rfc3339(&text)
                .map(Self)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Dispatches between the two accepted textual layouts.
fn parse_column_text(
    text: &str,
    zones: &ZoneConfig,
) -> Result<DateTime<FixedOffset>, TimestampError> {
    if text.contains('T') {
        return Ok(DateTime::parse_from_rfc3339(text)?);
    }
    let padded = pad_fraction(text);
    let naive = NaiveDateTime::parse_from_str(&padded, COLUMN_FORMAT)?;
    // A fixed offset maps every wall-clock time to exactly one instant.
    let base = zones.base();
    Ok(DateTime::from_naive_utc_and_offset(naive - base, base))
}

/// Right-pads the fractional digits to the full nine-digit column layout
/// so a single format string covers every stored precision. A value with
/// no fraction gains an all-zero one. Anything that still does not fit
/// the layout is left for the parser to reject.
fn pad_fraction(text: &str) -> String {
    match text.split_once('.') {
        Some((whole, fraction)) => {
            format!("{whole}.{fraction:0<width$}", width = FRACTION_DIGITS)
        }
        None => format!("{text}.{empty:0<width$}", empty = "", width = FRACTION_DIGITS),
    }
}

/// The "zero date" test: calendar year, month, and day all at or below 1
/// in the value's own offset.
fn is_zero_date(dt: &DateTime<FixedOffset>) -> bool {
    dt.year() <= 1 && dt.month() <= 1 && dt.day() <= 1
}

/// 0001-01-01 00:00:00 at offset zero.
fn zero_instant() -> DateTime<FixedOffset> {
    let naive = NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("0001-01-01T00:00:00 is a valid date-time");
    let utc = FixedOffset::east_opt(0).expect("zero offset is valid");
    DateTime::from_naive_utc_and_offset(naive, utc)
}

/// Rounds half away from zero to the nearest microsecond. Pure
/// field-level arithmetic, so it works for instants outside the range a
/// nanosecond unix timestamp can address.
fn round_to_micros(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let nanos = dt.nanosecond();
    if nanos >= 1_000_000_000 {
        // Leap second representation; leave untouched.
        return dt;
    }
    let rem = nanos % 1_000;
    if rem == 0 {
        return dt;
    }
    let floor = nanos - rem;
    if rem < 500 {
        dt.with_nanosecond(floor).unwrap_or(dt)
    } else if floor + 1_000 < 1_000_000_000 {
        dt.with_nanosecond(floor + 1_000).unwrap_or(dt)
    } else {
        dt.with_nanosecond(0)
            .and_then(|d| d.checked_add_signed(TimeDelta::seconds(1)))
            .unwrap_or(dt)
    }
}
