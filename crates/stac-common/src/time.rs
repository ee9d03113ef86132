//! Time handling for STAC datetime fields.
//!
//! Dataset instants are calendar constants without a timezone; they are
//! treated as UTC and always rendered with a trailing `Z`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Format used for every datetime field written into STAC objects.
pub const STAC_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render an instant as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_stac_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(STAC_DATETIME_FORMAT).to_string()
}

/// Parse a STAC datetime string back into a UTC instant.
///
/// Accepts RFC 3339 with any offset, and naive timestamps (assumed UTC).
pub fn parse_stac_datetime(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// Build a UTC instant from calendar constants.
pub(crate) fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("calendar constants are valid dates")
}

/// A closed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "stac_datetime")]
    pub start: DateTime<Utc>,
    #[serde(with = "stac_datetime")]
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Exact midpoint: `start + (end - start) / 2`.
    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + (self.end - self.start) / 2
    }
}

/// The full acquisition period of the mission: 2019-12-01 to 2020-11-30.
pub fn mission_interval() -> DateRange {
    DateRange::new(utc(2019, 12, 1, 0), utc(2020, 11, 30, 0))
}

/// Serde adapter writing `DateTime<Utc>` as `YYYY-MM-DDTHH:MM:SSZ`.
pub mod stac_datetime {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_stac_datetime(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_stac_datetime(&s).map_err(de::Error::custom)
    }

    /// Same format for optional fields; `None` is written as `null`.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            dt: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => serializer.serialize_str(&super::super::format_stac_datetime(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::super::parse_stac_datetime(&s).map_err(de::Error::custom))
                .transpose()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid datetime format: {0}")]
    InvalidFormat(String),
}
