//! Avro logical-type registry.
//!
//! Maps a logical-type tag (`date`, `time-millis`, `timestamp-micros`, …) to a
//! pure parser that turns the raw encoded scalar into a rich domain value.
//! Time-of-day offsets count from midnight; timestamp offsets count from the
//! Unix epoch. The `local-*` variants resolve the same instant and then drop
//! the offset, leaving a wall-clock value with no timezone attached.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use thiserror::Error;

const MILLIS_PER_DAY: i64 = 86_400_000;
const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Error returned when a logical-type parser rejects its input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogicalError {
    #[error("invalid ISO-8601 date `{0}`")]
    Date(String),
    #[error("{tag} offset {offset} out of range")]
    OutOfRange { tag: &'static str, offset: i64 },
    #[error("invalid decimal `{0}`")]
    Decimal(String),
    #[error("{tag} expects {expected}, got `{found}`")]
    Encoding {
        tag: &'static str,
        expected: &'static str,
        found: String,
    },
}

/// A parsed logical-type value.
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalValue {
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
    LocalTimestamp(NaiveDateTime),
    Decimal(Decimal),
}

/// The closed set of recognized logical-type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    LocalTimestampMillis,
    LocalTimestampMicros,
    Decimal,
}

impl LogicalType {
    /// All recognized tags, in declaration order.
    pub const ALL: [LogicalType; 8] = [
        Self::Date,
        Self::TimeMillis,
        Self::TimeMicros,
        Self::TimestampMillis,
        Self::TimestampMicros,
        Self::LocalTimestampMillis,
        Self::LocalTimestampMicros,
        Self::Decimal,
    ];

    /// Registry lookup. Unknown tags return `None`; callers fall back to the
    /// underlying primitive, which is also what Avro prescribes for
    /// unrecognized logical types.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "date" => Some(Self::Date),
            "time-millis" => Some(Self::TimeMillis),
            "time-micros" => Some(Self::TimeMicros),
            "timestamp-millis" => Some(Self::TimestampMillis),
            "timestamp-micros" => Some(Self::TimestampMicros),
            "local-timestamp-millis" => Some(Self::LocalTimestampMillis),
            "local-timestamp-micros" => Some(Self::LocalTimestampMicros),
            "decimal" => Some(Self::Decimal),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::TimeMillis => "time-millis",
            Self::TimeMicros => "time-micros",
            Self::TimestampMillis => "timestamp-millis",
            Self::TimestampMicros => "timestamp-micros",
            Self::LocalTimestampMillis => "local-timestamp-millis",
            Self::LocalTimestampMicros => "local-timestamp-micros",
            Self::Decimal => "decimal",
        }
    }

    /// Parse a raw encoded scalar into the domain value for this tag.
    ///
    /// Every tag except `date` and `decimal` expects an integer offset.
    /// `date` expects a `"YYYY-MM-DD"` string; `decimal` accepts a string,
    /// integer, or float representation.
    pub fn parse(self, raw: &JsonValue) -> Result<LogicalValue, LogicalError> {
        match self {
            Self::Date => parse_date(raw),
            Self::TimeMillis => {
                let ms = int_input(self, raw)?;
                time_from_midnight(self, ms, MILLIS_PER_DAY, 1_000_000).map(LogicalValue::Time)
            }
            Self::TimeMicros => {
                let us = int_input(self, raw)?;
                time_from_midnight(self, us, MICROS_PER_DAY, 1_000).map(LogicalValue::Time)
            }
            Self::TimestampMillis => {
                let ms = int_input(self, raw)?;
                timestamp_millis(self, ms).map(LogicalValue::Timestamp)
            }
            Self::TimestampMicros => {
                let us = int_input(self, raw)?;
                timestamp_micros(self, us).map(LogicalValue::Timestamp)
            }
            Self::LocalTimestampMillis => {
                let ms = int_input(self, raw)?;
                timestamp_millis(self, ms).map(|dt| LogicalValue::LocalTimestamp(dt.naive_utc()))
            }
            Self::LocalTimestampMicros => {
                let us = int_input(self, raw)?;
                timestamp_micros(self, us).map(|dt| LogicalValue::LocalTimestamp(dt.naive_utc()))
            }
            Self::Decimal => parse_decimal(raw),
        }
    }
}

fn int_input(lt: LogicalType, raw: &JsonValue) -> Result<i64, LogicalError> {
    raw.as_i64().ok_or_else(|| LogicalError::Encoding {
        tag: lt.tag(),
        expected: "an integer",
        found: raw.to_string(),
    })
}

fn parse_date(raw: &JsonValue) -> Result<LogicalValue, LogicalError> {
    let s = raw.as_str().ok_or_else(|| LogicalError::Encoding {
        tag: "date",
        expected: "an ISO-8601 date string",
        found: raw.to_string(),
    })?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(LogicalValue::Date)
        .map_err(|_| LogicalError::Date(s.to_string()))
}

/// Offset since midnight at `per_day` units per day, `to_nanos` nanoseconds
/// per unit inside the sub-second remainder.
fn time_from_midnight(
    lt: LogicalType,
    offset: i64,
    per_day: i64,
    to_nanos: i64,
) -> Result<NaiveTime, LogicalError> {
    if !(0..per_day).contains(&offset) {
        return Err(LogicalError::OutOfRange {
            tag: lt.tag(),
            offset,
        });
    }
    let per_sec = per_day / 86_400;
    let secs = (offset / per_sec) as u32;
    let nanos = ((offset % per_sec) * to_nanos) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos).ok_or(LogicalError::OutOfRange {
        tag: lt.tag(),
        offset,
    })
}

fn timestamp_millis(lt: LogicalType, ms: i64) -> Result<DateTime<Utc>, LogicalError> {
    DateTime::from_timestamp_millis(ms).ok_or(LogicalError::OutOfRange {
        tag: lt.tag(),
        offset: ms,
    })
}

fn timestamp_micros(lt: LogicalType, us: i64) -> Result<DateTime<Utc>, LogicalError> {
    DateTime::from_timestamp_micros(us).ok_or(LogicalError::OutOfRange {
        tag: lt.tag(),
        offset: us,
    })
}

fn parse_decimal(raw: &JsonValue) -> Result<LogicalValue, LogicalError> {
    let d = match raw {
        JsonValue::String(s) => s.parse::<Decimal>().ok(),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        _ => None,
    };
    d.map(LogicalValue::Decimal)
        .ok_or_else(|| LogicalError::Decimal(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn from_tag_roundtrips_every_variant() {
        for lt in LogicalType::ALL {
            assert_eq!(LogicalType::from_tag(lt.tag()), Some(lt));
        }
    }

    #[test]
    fn from_tag_unknown_is_none() {
        assert_eq!(LogicalType::from_tag("uuid"), None);
        assert_eq!(LogicalType::from_tag(""), None);
    }

    #[test]
    fn date_parses_iso_string() {
        let v = LogicalType::Date.parse(&json!("2024-03-01")).unwrap();
        assert_eq!(
            v,
            LogicalValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn date_rejects_garbage() {
        assert!(matches!(
            LogicalType::Date.parse(&json!("03/01/2024")),
            Err(LogicalError::Date(_))
        ));
        assert!(matches!(
            LogicalType::Date.parse(&json!(19_000)),
            Err(LogicalError::Encoding { tag: "date", .. })
        ));
    }

    #[test]
    fn time_millis_hour_minute_second() {
        // 1h 1m 1s past midnight.
        let v = LogicalType::TimeMillis.parse(&json!(3_661_000)).unwrap();
        assert_eq!(
            v,
            LogicalValue::Time(NaiveTime::from_hms_opt(1, 1, 1).unwrap())
        );
    }

    #[test]
    fn time_millis_keeps_subsecond_precision() {
        let v = LogicalType::TimeMillis.parse(&json!(1_234)).unwrap();
        assert_eq!(
            v,
            LogicalValue::Time(NaiveTime::from_hms_milli_opt(0, 0, 1, 234).unwrap())
        );
    }

    #[test]
    fn time_micros_keeps_subsecond_precision() {
        let v = LogicalType::TimeMicros.parse(&json!(1_000_007)).unwrap();
        assert_eq!(
            v,
            LogicalValue::Time(NaiveTime::from_hms_micro_opt(0, 0, 1, 7).unwrap())
        );
    }

    #[test]
    fn time_rejects_negative_and_past_midnight() {
        assert!(LogicalType::TimeMillis.parse(&json!(-1)).is_err());
        assert!(LogicalType::TimeMillis.parse(&json!(86_400_000)).is_err());
        assert!(LogicalType::TimeMicros.parse(&json!(86_400_000_000i64)).is_err());
    }

    #[test]
    fn timestamp_millis_zero_is_epoch() {
        let v = LogicalType::TimestampMillis.parse(&json!(0)).unwrap();
        assert_eq!(
            v,
            LogicalValue::Timestamp(DateTime::from_timestamp_millis(0).unwrap())
        );
    }

    #[test]
    fn timestamp_micros_negative_is_before_epoch() {
        let v = LogicalType::TimestampMicros.parse(&json!(-1_000_000)).unwrap();
        assert_eq!(
            v,
            LogicalValue::Timestamp(DateTime::from_timestamp_millis(-1_000).unwrap())
        );
    }

    #[test]
    fn local_timestamp_drops_offset() {
        let v = LogicalType::LocalTimestampMillis.parse(&json!(0)).unwrap();
        assert_eq!(
            v,
            LogicalValue::LocalTimestamp(
                NaiveDate::from_ymd_opt(1970, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn timestamp_rejects_non_integer() {
        assert!(matches!(
            LogicalType::TimestampMillis.parse(&json!("soon")),
            Err(LogicalError::Encoding { .. })
        ));
    }

    #[test]
    fn decimal_from_string_integer_and_float() {
        assert_eq!(
            LogicalType::Decimal.parse(&json!("3.14")).unwrap(),
            LogicalValue::Decimal("3.14".parse().unwrap())
        );
        assert_eq!(
            LogicalType::Decimal.parse(&json!(42)).unwrap(),
            LogicalValue::Decimal(Decimal::from(42))
        );
        assert_eq!(
            LogicalType::Decimal.parse(&json!(2.5)).unwrap(),
            LogicalValue::Decimal("2.5".parse().unwrap())
        );
    }

    #[test]
    fn decimal_rejects_garbage() {
        assert!(matches!(
            LogicalType::Decimal.parse(&json!("12.3.4")),
            Err(LogicalError::Decimal(_))
        ));
        assert!(LogicalType::Decimal.parse(&json!([1, 2])).is_err());
    }

    proptest! {
        #[test]
        fn decimal_string_roundtrip(mantissa in -1_000_000_000i64..1_000_000_000, scale in 0u32..10) {
            let d = Decimal::new(mantissa, scale);
            let parsed = LogicalType::Decimal.parse(&json!(d.to_string())).unwrap();
            prop_assert_eq!(parsed, LogicalValue::Decimal(d));
        }

        #[test]
        fn time_scales_agree_at_millisecond_resolution(ms in 0i64..86_400_000) {
            let coarse = LogicalType::TimeMillis.parse(&json!(ms)).unwrap();
            let fine = LogicalType::TimeMicros.parse(&json!(ms * 1_000)).unwrap();
            prop_assert_eq!(coarse, fine);
        }

        #[test]
        fn timestamp_scales_agree_at_millisecond_resolution(ms in -62_135_596_800_000i64..253_402_300_799_000) {
            let coarse = LogicalType::TimestampMillis.parse(&json!(ms)).unwrap();
            let fine = LogicalType::TimestampMicros.parse(&json!(ms * 1_000)).unwrap();
            prop_assert_eq!(coarse, fine);
        }
    }
}
