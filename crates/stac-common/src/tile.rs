//! Tile identifiers for the 1x1 degree dataset grid.
//!
//! Tiles are labelled by the upper-left corner of the cell they cover,
//! e.g. `N49E009` covers longitudes 9..10 and latitudes 48..49. Southern
//! latitudes and western longitudes are negated before the corner is
//! applied, so `S78W161` covers longitudes -161..-160 and latitudes -79..-78.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;

/// Length of a tile token: hemisphere, 2 latitude digits, hemisphere, 3 longitude digits.
pub const TILE_ID_LEN: usize = 7;

/// Root prefix of the per-tile directories in the dataset bucket.
pub const TILES_ROOT_PREFIX: &str = "data/tiles/";

/// Prefix holding every object of a tile.
pub fn tile_prefix(tile: &str) -> String {
    format!("{}{}/", TILES_ROOT_PREFIX, tile)
}

/// A validated tile identifier such as `N00E005`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TileId {
    token: String,
    latitude: i32,
    longitude: i32,
}

impl TileId {
    /// Parse a tile token. Only the upper-case form `[NS]\d\d[EW]\d\d\d` is accepted.
    pub fn parse(token: &str) -> Result<Self, TileParseError> {
        let bytes = token.as_bytes();
        if bytes.len() != TILE_ID_LEN {
            return Err(TileParseError::InvalidLength(token.to_string()));
        }

        let lat_sign = match bytes[0] {
            b'N' => 1,
            b'S' => -1,
            _ => return Err(TileParseError::InvalidHemisphere(token.to_string())),
        };
        let lon_sign = match bytes[3] {
            b'E' => 1,
            b'W' => -1,
            _ => return Err(TileParseError::InvalidHemisphere(token.to_string())),
        };

        let latval = parse_digits(&bytes[1..3])
            .ok_or_else(|| TileParseError::InvalidDigits(token.to_string()))?;
        let lonval = parse_digits(&bytes[4..7])
            .ok_or_else(|| TileParseError::InvalidDigits(token.to_string()))?;

        Ok(Self {
            token: token.to_string(),
            latitude: lat_sign * latval,
            longitude: lon_sign * lonval,
        })
    }

    /// The tile token as it appears in filenames.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Signed latitude of the upper edge.
    pub fn latitude(&self) -> i32 {
        self.latitude
    }

    /// Signed longitude of the left edge.
    pub fn longitude(&self) -> i32 {
        self.longitude
    }

    /// The 1x1 degree cell covered by this tile.
    pub fn bbox(&self) -> BoundingBox {
        let max_y = self.latitude;
        let min_y = max_y - 1;
        let min_x = self.longitude;
        let max_x = min_x + 1;
        BoundingBox::new(min_x as f64, min_y as f64, max_x as f64, max_y as f64)
    }
}

/// Decode a tile token straight into its bounding box.
pub fn decode(token: &str) -> Result<BoundingBox, TileParseError> {
    TileId::parse(token).map(|tile| tile.bbox())
}

fn parse_digits(digits: &[u8]) -> Option<i32> {
    digits.iter().try_fold(0i32, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + i32::from(b - b'0'))
    })
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl FromStr for TileId {
    type Err = TileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TileId {
    type Error = TileParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TileId> for String {
    fn from(tile: TileId) -> Self {
        tile.token
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TileParseError {
    #[error("Invalid tile id length: {0}. Expected 7 characters like 'N00E005'")]
    InvalidLength(String),

    #[error("Invalid hemisphere letter in tile id: {0}")]
    InvalidHemisphere(String),

    #[error("Invalid digits in tile id: {0}")]
    InvalidDigits(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let tile = TileId::parse("S78W161").unwrap();
        assert_eq!(tile.latitude(), -78);
        assert_eq!(tile.longitude(), -161);
        assert_eq!(tile.as_str(), "S78W161");
    }

    #[test]
    fn test_rejects_lowercase() {
        assert!(matches!(
            TileId::parse("n00e005"),
            Err(TileParseError::InvalidHemisphere(_))
        ));
    }

    #[test]
    fn test_tile_prefix() {
        assert_eq!(tile_prefix("N00E005"), "data/tiles/N00E005/");
    }

    #[test]
    fn test_rejects_signs_in_digits() {
        assert!(matches!(
            TileId::parse("N-1E005"),
            Err(TileParseError::InvalidDigits(_))
        ));
    }
}
