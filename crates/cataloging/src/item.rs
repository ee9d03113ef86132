//! Single-item building: one STAC item per object key.

use stac_common::{mission_interval, StacResult};
use stac_protocol::{media_type, Asset, Item, ItemProperties};

use crate::config::{COLLECTION_ID, SENTINEL1};
use crate::metadata::{parse_item_key, ParsedAsset};

/// Asset key of the single data file of a per-key item.
pub const DATA_ASSET_KEY: &str = "DATA";

/// Join a key onto a base URL.
///
/// A key that is already an absolute URL is returned unchanged. A key with
/// a leading `/` replaces the whole path of the base. Otherwise the key
/// replaces everything after the last `/` of the base. Dot segments are
/// not normalized: `https://h/a/b/` joined with `../c.tif` stays
/// `https://h/a/b/../c.tif`. Dataset keys never contain them.
pub fn resolve_href(base_url: &str, key: &str) -> String {
    if key.contains("://") {
        return key.to_string();
    }

    if let Some(rooted) = key.strip_prefix('/') {
        return match base_url.split_once("://") {
            Some((scheme, rest)) => {
                let authority = rest.split('/').next().unwrap_or(rest);
                format!("{}://{}/{}", scheme, authority, rooted)
            }
            None => key.to_string(),
        };
    }

    // The authority of "https://host" is not a directory.
    let base_dir = match base_url.rfind('/') {
        Some(pos) if !base_url[..=pos].ends_with("://") => &base_url[..=pos],
        _ if base_url.contains("://") => return format!("{}/{}", base_url, key),
        _ => "",
    };
    format!("{}{}", base_dir, key)
}

/// Build the STAC item for one object key.
pub fn create_stac_item(key: &str, base_url: &str) -> StacResult<Item> {
    let asset = parse_item_key(key)?;
    Ok(build_item(&asset, base_url))
}

/// Build a STAC item from decoded metadata.
///
/// Items span the full mission by default; seasonal products narrow the
/// range to their season and gain a nominal `datetime`.
pub fn build_item(asset: &ParsedAsset, base_url: &str) -> Item {
    let mission = mission_interval();
    let mut properties = ItemProperties {
        tile: asset.tile.to_string(),
        season: None,
        datetime: None,
        start_datetime: mission.start,
        end_datetime: mission.end,
        sar: SENTINEL1.properties(&asset.product, Vec::new()),
    };

    if let Some(seasonal) = &asset.seasonal {
        properties.season = Some(seasonal.label.clone());
        properties.start_datetime = seasonal.date_range.start;
        properties.end_datetime = seasonal.date_range.end;
        properties.datetime = Some(seasonal.datetime);
        properties.sar.polarizations = vec![seasonal.polarization.to_string()];
    }

    let mut item = Item::new(asset.id.clone(), &asset.bbox, properties).with_collection(COLLECTION_ID);
    item.add_asset(
        DATA_ASSET_KEY,
        Asset::new(resolve_href(base_url, &asset.key), media_type::GEOTIFF),
    );
    item
}
