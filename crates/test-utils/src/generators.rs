//! Generators for synthetic bucket listings.
//!
//! Listings mirror what a real tile prefix holds: two yearly rasters per
//! orbit plus, for every season, amplitude per polarization and coherence
//! and decay model products on the co-polarized channel.

use crate::fixtures::products;

pub use stac_common::tile_prefix;

/// Key of one object in a tile prefix.
pub fn tile_key(tile: &str, basename: &str) -> String {
    format!("{}{}", tile_prefix(tile), basename)
}

/// Creates the full listing of a tile.
///
/// # Arguments
///
/// * `tile` - Tile id, e.g. `N00E005`
/// * `orbit` - Orbit marker for yearly products, e.g. `124D`
/// * `seasons` - Lower-case season names present for this tile
/// * `polarizations` - Lower-case channels; the first one is treated as co-polarized
///
/// # Example
///
/// ```
/// use test_utils::tile_listing;
///
/// let keys = tile_listing("N00E005", "124D", &["fall"], &["vv", "vh"]);
/// assert!(keys.contains(&"data/tiles/N00E005/N00E005_124D_inc.tif".to_string()));
/// assert!(keys.contains(&"data/tiles/N00E005/N00E005_fall_vh_AMP.tif".to_string()));
/// assert!(keys.contains(&"data/tiles/N00E005/N00E005_fall_vv_COH36.tif".to_string()));
/// ```
pub fn tile_listing(tile: &str, orbit: &str, seasons: &[&str], polarizations: &[&str]) -> Vec<String> {
    let mut keys: Vec<String> = products::YEARLY
        .iter()
        .map(|product| tile_key(tile, &format!("{}_{}_{}.tif", tile, orbit, product)))
        .collect();

    for season in seasons {
        for pol in polarizations {
            keys.push(tile_key(tile, &format!("{}_{}_{}_AMP.tif", tile, season, pol)));
        }

        if let Some(co_pol) = polarizations.first() {
            for product in products::COHERENCE.iter().chain(products::DECAY_MODEL.iter()) {
                keys.push(tile_key(
                    tile,
                    &format!("{}_{}_{}_{}.tif", tile, season, co_pol, product),
                ));
            }
        }
    }

    keys
}

/// Number of keys `tile_listing` produces for the given shape.
pub fn tile_listing_len(seasons: usize, polarizations: usize) -> usize {
    let per_season = polarizations
        + if polarizations > 0 {
            products::COHERENCE.len() + products::DECAY_MODEL.len()
        } else {
            0
        };
    products::YEARLY.len() + seasons * per_season
}
