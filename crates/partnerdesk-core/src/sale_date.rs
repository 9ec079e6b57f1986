//! # Sale Date Normalization
//!
//! Sale dates reach us in whatever shape the store kept them in. SQLite has
//! no date type, so the same column can hold any of these, depending on
//! which tool wrote the row. The column has NUMERIC affinity, so text that
//! looks like a number is stored as one: `'20230323'` arrives as INTEGER.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stored value                        RawSaleDate          Normalized    │
//! │  ──────────────────────────────────  ───────────────────  ──────────    │
//! │  TEXT    '2023-03-23'                Text                 2023-03-23    │
//! │  TEXT    '2023-03-23 14:05:00'       Text                 2023-03-23    │
//! │  TEXT    '2023-03-23T14:05:00+03:00' Text                 2023-03-23    │
//! │  TEXT    '23.03.2023'                Text                 2023-03-23    │
//! │  INTEGER 20230323 (YYYYMMDD)         Integer              2023-03-23    │
//! │  INTEGER 1679529600 (unix seconds)   Integer              2023-03-23    │
//! │  REAL    2460026.5 (julian day)      JulianDay            2023-03-23    │
//! │  BLOB    b"2023-03-23"               Bytes                2023-03-23    │
//! │  anything else                       Other / NULL         as-is / ""    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Anything that can't be read as a date falls through to its plain textual
//! form instead of failing the whole sales query.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::ops::RangeInclusive;

/// Canonical output format.
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Julian day number of 1970-01-01T00:00:00Z.
const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Integers in this range are read as `YYYYMMDD` before unix seconds. The
/// seconds they would otherwise mean all fall in late 1970.
const COMPACT_DATE_RANGE: RangeInclusive<i64> = 19_000_101..=29_991_231;

const TEXT_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

const TEXT_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// A sale date as it came out of the store, one variant per SQLite storage
/// class.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSaleDate {
    Text(String),
    Bytes(Vec<u8>),
    /// `YYYYMMDD` when it reads as a calendar date, otherwise unix seconds.
    Integer(i64),
    JulianDay(f64),
    /// A representation nobody recognized, already rendered as text.
    Other(String),
    Null,
}

/// Converts a stored sale date to `YYYY-MM-DD`.
///
/// ## Example
/// ```rust
/// use partnerdesk_core::sale_date::{normalize_sale_date, RawSaleDate};
///
/// let raw = RawSaleDate::Text("2023-03-23 09:15:00".to_string());
/// assert_eq!(normalize_sale_date(raw), "2023-03-23");
///
/// let raw = RawSaleDate::Text("last spring".to_string());
/// assert_eq!(normalize_sale_date(raw), "last spring");
/// ```
pub fn normalize_sale_date(raw: RawSaleDate) -> String {
    match raw {
        RawSaleDate::Text(text) => normalize_text(&text),
        RawSaleDate::Bytes(bytes) => normalize_text(&String::from_utf8_lossy(&bytes)),
        RawSaleDate::Integer(value) => from_compact_date(value)
            .or_else(|| DateTime::from_timestamp(value, 0).map(|dt| dt.date_naive()))
            .map(format_date)
            .unwrap_or_else(|| value.to_string()),
        RawSaleDate::JulianDay(day) => from_julian_day(day)
            .map(format_date)
            .unwrap_or_else(|| day.to_string()),
        RawSaleDate::Other(text) => text,
        RawSaleDate::Null => String::new(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(SALE_DATE_FORMAT).to_string()
}

/// Tries the known text layouts; returns the trimmed input when none match.
fn normalize_text(text: &str) -> String {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return format_date(dt.date_naive());
    }

    for fmt in TEXT_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return format_date(dt.date());
        }
    }

    for fmt in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return format_date(date);
        }
    }

    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(date) = text.parse().ok().and_then(from_compact_date) {
            return format_date(date);
        }
    }

    text.to_string()
}

fn from_compact_date(value: i64) -> Option<NaiveDate> {
    if !COMPACT_DATE_RANGE.contains(&value) {
        return None;
    }
    let year = i32::try_from(value / 10_000).ok()?;
    let month = u32::try_from(value / 100 % 100).ok()?;
    let day = u32::try_from(value % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn from_julian_day(day: f64) -> Option<NaiveDate> {
    if !day.is_finite() {
        return None;
    }
    let secs = ((day - UNIX_EPOCH_JULIAN_DAY) * SECONDS_PER_DAY).round();
    if secs.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0).map(|dt| dt.date_naive())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_dates() {
        // '20230323' written to the column comes back as an INTEGER
        assert_eq!(normalize_sale_date(RawSaleDate::Integer(20_230_323)), "2023-03-23");
        assert_eq!(normalize_sale_date(RawSaleDate::Integer(19_000_101)), "1900-01-01");
        assert_eq!(
            normalize_sale_date(RawSaleDate::Text("20221202".to_string())),
            "2022-12-02"
        );
        assert_eq!(
            normalize_sale_date(RawSaleDate::Bytes(b"20240229".to_vec())),
            "2024-02-29"
        );

        // Not a calendar date, so these are still unix seconds
        assert_eq!(normalize_sale_date(RawSaleDate::Integer(20_231_301)), "1970-08-23");
        assert_eq!(normalize_sale_date(RawSaleDate::Integer(18_991_231)), "1970-08-08");

        assert_eq!(
            normalize_sale_date(RawSaleDate::Text("20231301".to_string())),
            "20231301"
        );
    }

    #[test]
    fn test_text_layouts() {
        let cases = [
            ("2023-03-23", "2023-03-23"),
            ("  2023-03-23  ", "2023-03-23"),
            ("2023-03-23 14:05:00", "2023-03-23"),
            ("2023-03-23 14:05:00.250", "2023-03-23"),
            ("2023-03-23T14:05:00", "2023-03-23"),
            ("2023-03-23T01:00:00+03:00", "2023-03-23"),
            ("23.03.2023", "2023-03-23"),
            ("2023/03/23", "2023-03-23"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                normalize_sale_date(RawSaleDate::Text(input.to_string())),
                expected,
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_bytes_are_read_as_text() {
        let raw = RawSaleDate::Bytes(b"2021-06-15 10:00:00".to_vec());
        assert_eq!(normalize_sale_date(raw), "2021-06-15");
    }

    #[test]
    fn test_numeric_representations() {
        // 2023-03-23T00:00:00Z
        assert_eq!(
            normalize_sale_date(RawSaleDate::Integer(1_679_529_600)),
            "2023-03-23"
        );
        // julianday('2023-03-23') = 2460026.5
        assert_eq!(
            normalize_sale_date(RawSaleDate::JulianDay(2_460_026.5)),
            "2023-03-23"
        );
    }

    #[test]
    fn test_unrecognized_falls_back_to_text() {
        assert_eq!(
            normalize_sale_date(RawSaleDate::Text("Q1 2023".to_string())),
            "Q1 2023"
        );
        assert_eq!(
            normalize_sale_date(RawSaleDate::Other("<opaque>".to_string())),
            "<opaque>"
        );
        assert_eq!(normalize_sale_date(RawSaleDate::JulianDay(f64::NAN)), "NaN");
        assert_eq!(normalize_sale_date(RawSaleDate::Null), "");
    }
}
