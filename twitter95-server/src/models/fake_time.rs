//! Simulated posting time
//!
//! Tweets carry a nullable "fake time" that places them on the simulated
//! 1995 timeline. Readers pass a cutoff in the same format to see the
//! timeline as it stood at that moment.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::ValidationError;

/// Naive formats, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Integers larger in magnitude than this are unix milliseconds, not seconds.
const MILLIS_THRESHOLD: u64 = 20_000_000_000;

/// Earliest instant a Postgres `timestamptz` can hold (4714-11-24 00:00:00 BC).
const POSTGRES_MIN_UNIX_SECONDS: i64 = -210_866_803_200;

/// Validated simulated timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FakeTime(DateTime<Utc>);

/// Wire forms accepted for a fake time: text or unix seconds
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFakeTime {
    Text(String),
    Seconds(i64),
}

impl FakeTime {
    /// Parse a fake time.
    ///
    /// # Accepted forms
    /// - RFC 3339 with offset (`1995-06-01T12:00:00Z`, `...+02:00`)
    /// - Naive date-time, `T` or space separated, optional fraction (UTC)
    /// - Integer unix seconds, or milliseconds when the magnitude exceeds 2e10
    ///
    /// # Example
    /// ```
    /// use twitter95_server::models::FakeTime;
    ///
    /// assert!(FakeTime::parse("1995-06-01T12:00:00Z").is_ok());
    /// assert!(FakeTime::parse("1995-06-01 12:00:00").is_ok());
    /// assert!(FakeTime::parse("sometime in june").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let s = raw.trim();

        if let Ok(n) = s.parse::<i64>() {
            return Self::from_unix(n);
        }

        let parsed = DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z"))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
                    .map(|naive| naive.and_utc())
            });

        parsed
            .and_then(Self::storable)
            .ok_or_else(|| invalid(raw))
    }

    /// Build from a unix timestamp.
    ///
    /// Magnitudes up to 2e10 are seconds; larger ones are milliseconds, the
    /// unit a JavaScript `Date.now()` produces.
    pub fn from_unix(n: i64) -> Result<Self, ValidationError> {
        let dt = if n.unsigned_abs() > MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };

        dt.and_then(Self::storable)
            .ok_or_else(|| invalid(&n.to_string()))
    }

    /// Accept only instants Postgres can compare against a `timestamptz`.
    fn storable(dt: DateTime<Utc>) -> Option<Self> {
        (dt.timestamp() >= POSTGRES_MIN_UNIX_SECONDS).then_some(Self(dt))
    }

    /// The timestamp as UTC.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

fn invalid(value: &str) -> ValidationError {
    ValidationError::InvalidTimestamp {
        field: "fake_time",
        value: value.to_owned(),
    }
}

impl From<DateTime<Utc>> for FakeTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<FakeTime> for DateTime<Utc> {
    fn from(t: FakeTime) -> Self {
        t.0
    }
}

impl<'de> Deserialize<'de> for FakeTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawFakeTime::deserialize(deserializer)? {
            RawFakeTime::Text(s) => Self::parse(&s),
            RawFakeTime::Seconds(n) => Self::from_unix(n),
        }
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        let t = FakeTime::parse("1995-06-01T12:00:00Z").unwrap();
        assert_eq!(t.as_datetime(), utc(1995, 6, 1, 12, 0, 0));
    }

    #[test]
    fn normalizes_offset_to_utc() {
        let t = FakeTime::parse("1995-06-01T14:00:00+02:00").unwrap();
        assert_eq!(t.as_datetime(), utc(1995, 6, 1, 12, 0, 0));
    }

    #[test]
    fn parses_naive_as_utc() {
        let t = FakeTime::parse("1995-06-01T12:00:00").unwrap();
        assert_eq!(t.as_datetime(), utc(1995, 6, 1, 12, 0, 0));

        let t = FakeTime::parse("1995-06-01 12:00:00.250").unwrap();
        assert_eq!(t.as_datetime().timestamp_subsec_millis(), 250);

        let t = FakeTime::parse("1995-06-01T12:30").unwrap();
        assert_eq!(t.as_datetime(), utc(1995, 6, 1, 12, 30, 0));
    }

    #[test]
    fn parses_unix_seconds() {
        let t = FakeTime::parse("802008000").unwrap();
        assert_eq!(t.as_datetime(), utc(1995, 6, 1, 12, 0, 0));
    }

    #[test]
    fn large_integers_are_milliseconds() {
        let seconds = FakeTime::parse("802008000").unwrap();
        let millis = FakeTime::parse("802008000000").unwrap();
        assert_eq!(seconds, millis);

        // 2e10 itself is still seconds (year 2603)
        let t = FakeTime::from_unix(20_000_000_000).unwrap();
        assert_eq!(t.as_datetime().timestamp(), 20_000_000_000);

        let t = FakeTime::from_unix(-1_000_000_000_000).unwrap();
        assert_eq!(t.as_datetime().timestamp(), -1_000_000_000);
    }

    #[test]
    fn rejects_instants_before_postgres_range() {
        assert!(FakeTime::from_unix(-300_000_000_000_000).is_err());
        assert!(FakeTime::parse("-300000000000000").is_err());
        assert!(FakeTime::from_unix(i64::MIN).is_err());

        let earliest = FakeTime::from_unix(POSTGRES_MIN_UNIX_SECONDS * 1000).unwrap();
        assert_eq!(earliest.as_datetime().timestamp(), POSTGRES_MIN_UNIX_SECONDS);
    }

    #[test]
    fn rejects_garbage() {
        let err = FakeTime::parse("sometime in june").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimestamp { field: "fake_time", .. }));
    }

    #[test]
    fn deserializes_string_and_number() {
        let from_text: FakeTime = serde_json::from_str(r#""1995-06-01T12:00:00Z""#).unwrap();
        let from_number: FakeTime = serde_json::from_str("802008000").unwrap();
        assert_eq!(from_text, from_number);

        assert!(serde_json::from_str::<FakeTime>(r#""not a time""#).is_err());
    }

    #[test]
    fn orders_chronologically() {
        let early = FakeTime::parse("1995-01-01T00:00:00Z").unwrap();
        let late = FakeTime::parse("1995-12-31T23:59:59Z").unwrap();
        assert!(early < late);
    }
}
