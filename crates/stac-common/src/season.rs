//! Seasonal acquisition windows.
//!
//! The mission ran for one year, bucketed into four three-month seasons.
//! Each season has a fixed date range and a representative midpoint used
//! as the nominal observation instant of seasonal products.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{utc, DateRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in acquisition order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Upper-case table key, as used in grouped item ids.
    pub fn name(&self) -> &'static str {
        match self {
            Season::Winter => "WINTER",
            Season::Spring => "SPRING",
            Season::Summer => "SUMMER",
            Season::Fall => "FALL",
        }
    }

    /// Date range covered by this season.
    pub fn date_range(&self) -> DateRange {
        match self {
            Season::Winter => DateRange::new(utc(2019, 12, 1, 0), utc(2020, 2, 28, 0)),
            Season::Spring => DateRange::new(utc(2020, 3, 1, 0), utc(2020, 5, 31, 0)),
            Season::Summer => DateRange::new(utc(2020, 6, 1, 0), utc(2020, 8, 31, 0)),
            Season::Fall => DateRange::new(utc(2020, 9, 1, 0), utc(2020, 11, 30, 0)),
        }
    }

    /// Representative observation instant for the season.
    pub fn midpoint(&self) -> DateTime<Utc> {
        match self {
            Season::Winter => utc(2020, 1, 14, 12),
            Season::Spring => utc(2020, 4, 15, 12),
            Season::Summer => utc(2020, 7, 16, 12),
            Season::Fall => utc(2020, 10, 16, 0),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = SeasonParseError;

    /// Table lookup is case-insensitive: `fall`, `Fall` and `FALL` all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SeasonParseError::Unknown(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeasonParseError {
    #[error("Unknown season: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!("fall".parse::<Season>().unwrap(), Season::Fall);
        assert_eq!("WINTER".parse::<Season>().unwrap(), Season::Winter);
        assert!(matches!(
            "autumn".parse::<Season>(),
            Err(SeasonParseError::Unknown(_))
        ));
    }

    #[test]
    fn test_midpoints_sit_in_the_middle() {
        let expected = [
            (Season::Winter, Duration::days(44) + Duration::hours(12)),
            (Season::Spring, Duration::days(45) + Duration::hours(12)),
            (Season::Summer, Duration::days(45) + Duration::hours(12)),
            (Season::Fall, Duration::days(45)),
        ];

        for (season, half) in expected {
            let range = season.date_range();
            assert_eq!(season.midpoint() - range.start, half, "{season}");
            assert_eq!(range.end - season.midpoint(), half, "{season}");
            assert_eq!(range.midpoint(), season.midpoint(), "{season}");
        }
    }
}
