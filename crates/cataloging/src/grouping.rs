//! Seasonal grouping: one STAC item per tile and season.
//!
//! A grouped item carries every seasonal product of its tile and season
//! (amplitude, coherence, decay model) plus the tile's yearly products
//! (incidence angle, land/sea mask).

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use stac_common::{Polarization, Season, StacError, StacResult, TileId};
use stac_protocol::{media_type, Asset, Item, ItemProperties};

use crate::config::{is_yearly_product, COHERENCE_PRODUCT, SENTINEL1};
use crate::metadata::ParsedAsset;

/// The assets of one tile, split into yearly and per-season groups.
#[derive(Debug, Clone)]
pub struct TileAssets {
    pub tile: TileId,
    pub yearly: Vec<ParsedAsset>,
    pub seasonal: BTreeMap<Season, Vec<ParsedAsset>>,
    /// Yearly assets whose product was already taken by an earlier orbit.
    pub shadowed_yearly: Vec<ParsedAsset>,
}

/// Split the assets of a single tile by product kind and season.
///
/// Assets without season metadata must be one of the yearly products.
/// Items key yearly assets by product alone, so when a tile carries the
/// same yearly product for several orbits the first one in listing order
/// is kept and the rest are logged and set aside in `shadowed_yearly`.
pub fn group_tile_assets(assets: Vec<ParsedAsset>) -> StacResult<TileAssets> {
    let tile = assets
        .first()
        .map(|a| a.tile.clone())
        .ok_or_else(|| StacError::Format("No assets to group".to_string()))?;

    let mut yearly: Vec<ParsedAsset> = Vec::new();
    let mut shadowed_yearly = Vec::new();
    let mut seasonal: BTreeMap<Season, Vec<ParsedAsset>> = BTreeMap::new();

    for asset in assets {
        if asset.tile != tile {
            return Err(StacError::Format(format!(
                "Asset {} belongs to tile {}, expected {}",
                asset.id, asset.tile, tile
            )));
        }

        match asset.season() {
            Some(season) => seasonal.entry(season).or_default().push(asset),
            None if is_yearly_product(&asset.product) => {
                match yearly.iter().find(|kept| kept.product == asset.product) {
                    Some(kept) => {
                        warn!(
                            tile = %tile,
                            product = %asset.product,
                            kept = %kept.key,
                            dropped = %asset.key,
                            "Yearly product present for several orbits"
                        );
                        shadowed_yearly.push(asset);
                    }
                    None => yearly.push(asset),
                }
            }
            None => {
                return Err(StacError::Format(format!(
                    "Unexpected product {} without season in {}",
                    asset.product, asset.id
                )))
            }
        }
    }

    Ok(TileAssets {
        tile,
        yearly,
        seasonal,
        shadowed_yearly,
    })
}

/// Build one item per season present for a tile.
pub fn build_tile_items(assets: Vec<ParsedAsset>) -> StacResult<Vec<Item>> {
    let groups = group_tile_assets(assets)?;
    if groups.seasonal.is_empty() {
        return Err(StacError::Format(format!(
            "Tile {} has no seasonal products",
            groups.tile
        )));
    }

    groups
        .seasonal
        .values()
        .map(|seasonal| build_seasonal_item(&groups.yearly, seasonal))
        .collect()
}

/// Build the item for one tile and season.
///
/// All assets must share a tile, and all seasonal assets a season.
pub fn build_seasonal_item(yearly: &[ParsedAsset], seasonal: &[ParsedAsset]) -> StacResult<Item> {
    let first = seasonal
        .first()
        .ok_or_else(|| StacError::Format("No seasonal assets to build an item from".to_string()))?;
    let season = first
        .season()
        .ok_or_else(|| StacError::Format(format!("{} carries no season", first.id)))?;

    for asset in seasonal {
        if asset.tile != first.tile || asset.season() != Some(season) {
            return Err(StacError::Format(format!(
                "Asset {} does not belong to {}_{}",
                asset.id, first.tile, season
            )));
        }
    }
    if let Some(stray) = yearly.iter().find(|a| a.tile != first.tile) {
        return Err(StacError::Format(format!(
            "Yearly asset {} does not belong to tile {}",
            stray.id, first.tile
        )));
    }

    let item_id = format!("{}_{}", first.tile, season.name());
    let range = season.date_range();
    let polarizations: BTreeSet<Polarization> =
        seasonal.iter().filter_map(ParsedAsset::polarization).collect();

    let properties = ItemProperties {
        tile: first.tile.to_string(),
        season: Some(season.name().to_string()),
        datetime: Some(range.midpoint()),
        start_datetime: range.start,
        end_datetime: range.end,
        sar: SENTINEL1.properties(
            COHERENCE_PRODUCT,
            polarizations.iter().map(ToString::to_string).collect(),
        ),
    };

    let mut item = Item::new(item_id, &first.bbox, properties).with_collection(first.tile.as_str());

    for asset in yearly {
        if let Some(kept) = item.assets.get(&asset.product) {
            warn!(
                tile = %first.tile,
                product = %asset.product,
                kept = %kept.href,
                dropped = %asset.key,
                "Duplicate yearly product"
            );
            continue;
        }
        item.add_asset(
            asset.product.clone(),
            Asset::new(asset.key.clone(), media_type::GEOTIFF),
        );
    }

    for asset in seasonal {
        let polarization = asset
            .polarization()
            .map(|p| p.to_string())
            .unwrap_or_default();
        let key = format!("{}_{}", asset.product, polarization);
        let mut stac_asset =
            Asset::new(asset.key.clone(), media_type::GEOTIFF).with_polarization(polarization);

        stac_asset = match temporal_separation(&asset.product)? {
            Some(separation) => stac_asset
                .with_product(COHERENCE_PRODUCT)
                .with_temporal_separation(separation),
            None => stac_asset.with_product(asset.product.clone()),
        };

        item.add_asset(key, stac_asset);
    }

    debug!(item = %item.id, assets = item.assets.len(), "Built seasonal item");
    Ok(item)
}

/// Repeat interval of a coherence product: `COH36` gives `"36 days"`.
///
/// Returns `None` for products that are not coherence rasters.
pub fn temporal_separation(product: &str) -> StacResult<Option<String>> {
    let upper = product.to_ascii_uppercase();
    let Some(suffix) = upper.strip_prefix(COHERENCE_PRODUCT) else {
        return Ok(None);
    };

    suffix
        .parse::<u32>()
        .map(|days| Some(format!("{} days", days)))
        .map_err(|_| {
            StacError::Format(format!(
                "Coherence product {} has no day interval suffix",
                product
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporal_separation() {
        assert_eq!(temporal_separation("COH36").unwrap().as_deref(), Some("36 days"));
        assert_eq!(temporal_separation("COH06").unwrap().as_deref(), Some("6 days"));
        assert_eq!(temporal_separation("AMP").unwrap(), None);
        assert_eq!(temporal_separation("rho").unwrap(), None);
        assert!(matches!(temporal_separation("COH"), Err(StacError::Format(_))));
    }
}
