//! Collection assembly: one STAC collection per tile.

use tracing::{debug, warn};

use stac_common::{mission_interval, BoundingBox, StacError, StacResult};
use stac_protocol::{Collection, Extent, Item};

use crate::config::{
    COLLECTION_ID, COVERAGE_NORTH, COVERAGE_SOUTH, DESCRIPTION, LICENSE_ID,
};
use crate::grouping::build_tile_items;
use crate::metadata::parse_grouping_key;

/// A tile collection together with the items it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct TileCollection {
    pub collection: Collection,
    pub items: Vec<Item>,
}

impl TileCollection {
    pub fn id(&self) -> &str {
        &self.collection.id
    }
}

/// Result of building one tile. A failed tile keeps the prefix it was
/// listed under so it can be reported and retried.
#[derive(Debug)]
pub enum TileOutcome {
    Built(TileCollection),
    Failed { prefix: String, error: StacError },
}

impl TileOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, TileOutcome::Built(_))
    }
}

/// Wrap already-built items of one tile into a collection.
///
/// The spatial extent is the bbox of the first item; every item of a tile
/// shares it. The temporal extent is always the full mission interval.
pub fn assemble_collection(tile: &str, items: Vec<Item>) -> StacResult<TileCollection> {
    let first = items
        .first()
        .ok_or_else(|| StacError::Format(format!("Tile {} has no items", tile)))?;

    if let Some(stray) = items.iter().find(|item| item.properties.tile != tile) {
        return Err(StacError::Format(format!(
            "Item {} belongs to tile {}, not {}",
            stray.id, stray.properties.tile, tile
        )));
    }

    let extent = Extent::new(&first.bounding_box(), &mission_interval());
    let collection = Collection::new(tile, format!("Sentinel-1 Coherence Tile {}", tile), extent);

    Ok(TileCollection { collection, items })
}

/// Build the collection of one tile from every key listed under it.
pub fn build_tile_collection<S: AsRef<str>>(keys: &[S]) -> StacResult<TileCollection> {
    let assets = keys
        .iter()
        .map(|key| parse_grouping_key(key.as_ref()))
        .collect::<StacResult<Vec<_>>>()?;
    let tile = assets
        .first()
        .map(|asset| asset.tile.to_string())
        .ok_or_else(|| StacError::Format("No keys to build a collection from".to_string()))?;

    let items = build_tile_items(assets)?;
    debug!(tile = %tile, items = items.len(), "Assembled tile collection");
    assemble_collection(&tile, items)
}

/// Build one tile, degrading any failure to [`TileOutcome::Failed`].
pub fn build_tile_outcome<S: AsRef<str>>(prefix: &str, keys: &[S]) -> TileOutcome {
    match build_tile_collection(keys) {
        Ok(collection) => TileOutcome::Built(collection),
        Err(error) => {
            warn!(prefix = %prefix, error = %error, kind = error.kind(), "Tile collection failed");
            TileOutcome::Failed {
                prefix: prefix.to_string(),
                error,
            }
        }
    }
}

/// Parent collection of the items built one key at a time.
pub fn dataset_collection() -> Collection {
    let coverage = BoundingBox::new(-180.0, COVERAGE_SOUTH, 180.0, COVERAGE_NORTH);
    Collection::new(COLLECTION_ID, DESCRIPTION, Extent::new(&coverage, &mission_interval()))
        .with_title("Global Seasonal Sentinel-1 Interferometric Coherence and Backscatter")
        .with_license(LICENSE_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_rejects_empty() {
        assert!(matches!(
            assemble_collection("N00E005", Vec::new()),
            Err(StacError::Format(_))
        ));
    }

    #[test]
    fn test_dataset_collection() {
        let collection = dataset_collection();
        assert_eq!(collection.id, "sentinel-1-global-coherence");
        assert_eq!(collection.license, "CC-BY-4.0");
        assert_eq!(
            collection.extent.spatial.bbox,
            vec![vec![-180.0, -79.0, 180.0, 82.0]]
        );
    }

    #[test]
    fn test_failed_outcome_keeps_prefix() {
        let outcome = build_tile_outcome("data/tiles/N0E005/", &["data/tiles/N0E005/N0E005_fall_vv_AMP.tif"]);
        match outcome {
            TileOutcome::Failed { prefix, error } => {
                assert_eq!(prefix, "data/tiles/N0E005/");
                assert_eq!(error.kind(), "format");
            }
            TileOutcome::Built(_) => panic!("expected a failed outcome"),
        }
    }
}
