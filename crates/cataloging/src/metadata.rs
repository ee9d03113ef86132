//! Metadata extraction from dataset object keys.
//!
//! Basenames come in two shapes:
//!
//! - `{tile}_{orbit}_{product}` for yearly products, e.g. `N00E005_124D_inc.tif`
//! - `{tile}_{season}_{polarization}_{product}` for seasonal products,
//!   e.g. `N00E005_fall_vh_AMP.tif`
//!
//! Anything else is malformed.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use stac_common::{
    BatchReport, BoundingBox, DateRange, Polarization, Season, StacError, StacResult, TileId,
};

/// Case handling of the decoded tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Keep product and season tokens as written in the key. Tile and
    /// polarization are always upper-cased.
    #[default]
    Preserve,
    /// Upper-case every token.
    Upper,
}

/// Metadata decoded from one object key.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAsset {
    /// Basename without extension, as written in the key.
    pub id: String,
    /// The key or URL the metadata was decoded from.
    pub key: String,
    pub tile: TileId,
    pub bbox: BoundingBox,
    pub product: String,
    /// Orbit marker of yearly products, e.g. `124D`.
    pub orbit: Option<String>,
    pub seasonal: Option<SeasonalMetadata>,
}

/// Extra metadata carried by seasonal products.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalMetadata {
    pub season: Season,
    /// Season token after case handling, e.g. `fall` or `FALL`.
    pub label: String,
    pub date_range: DateRange,
    /// Table midpoint of the season.
    pub datetime: DateTime<Utc>,
    pub polarization: Polarization,
}

impl ParsedAsset {
    pub fn season(&self) -> Option<Season> {
        self.seasonal.as_ref().map(|s| s.season)
    }

    pub fn polarization(&self) -> Option<Polarization> {
        self.seasonal.as_ref().map(|s| s.polarization)
    }
}

/// Basename of a key up to its first `.`.
///
/// `path/to/key.tif` gives `key`.
pub fn item_id_from_key(key: &str) -> &str {
    let basename = key.rsplit('/').next().unwrap_or(key);
    basename.split('.').next().unwrap_or(basename)
}

/// Decode an object key into asset metadata.
pub fn parse_key(key: &str, case: KeyCase) -> StacResult<ParsedAsset> {
    let id = item_id_from_key(key);
    let tokens: Vec<&str> = id.split('_').collect();

    if tokens.iter().any(|t| t.is_empty()) {
        return Err(StacError::Format(format!("Empty token in basename: {}", id)));
    }

    let normalize = |token: &str| match case {
        KeyCase::Preserve => token.to_string(),
        KeyCase::Upper => token.to_ascii_uppercase(),
    };

    match tokens.as_slice() {
        [tile, orbit, product] => {
            let tile = TileId::parse(&tile.to_ascii_uppercase())?;
            Ok(ParsedAsset {
                id: id.to_string(),
                key: key.to_string(),
                bbox: tile.bbox(),
                tile,
                product: normalize(*product),
                orbit: Some(orbit.to_ascii_uppercase()),
                seasonal: None,
            })
        }
        [tile, season_token, polarization, product] => {
            let tile = TileId::parse(&tile.to_ascii_uppercase())?;
            let season: Season = season_token.parse()?;
            let polarization: Polarization = polarization.parse()?;
            Ok(ParsedAsset {
                id: id.to_string(),
                key: key.to_string(),
                bbox: tile.bbox(),
                tile,
                product: normalize(*product),
                orbit: None,
                seasonal: Some(SeasonalMetadata {
                    season,
                    label: normalize(*season_token),
                    date_range: season.date_range(),
                    datetime: season.midpoint(),
                    polarization,
                }),
            })
        }
        _ => Err(StacError::Format(format!(
            "Expected 3 or 4 '_'-separated tokens in {}, found {}",
            id,
            tokens.len()
        ))),
    }
}

/// Decode a key for single-item building (original case kept).
pub fn parse_item_key(key: &str) -> StacResult<ParsedAsset> {
    parse_key(key, KeyCase::Preserve)
}

/// Decode a key for seasonal grouping (all tokens upper-cased).
pub fn parse_grouping_key(key: &str) -> StacResult<ParsedAsset> {
    parse_key(key, KeyCase::Upper)
}

/// Unique tiles referenced by a list of keys or URLs.
///
/// Keys that cannot be decoded are reported as failures.
pub fn unique_tiles<'a, I>(keys: I) -> (BTreeSet<TileId>, BatchReport<TileId>)
where
    I: IntoIterator<Item = &'a str>,
{
    let report: BatchReport<TileId> = keys
        .into_iter()
        .map(|key| (key.to_string(), parse_item_key(key).map(|asset| asset.tile)))
        .collect();
    let tiles = report.succeeded.iter().cloned().collect();
    (tiles, report)
}
