//! End-to-end tests of the key -> item -> collection -> catalog pipeline.

use chrono::{TimeZone, Utc};

use cataloging::config::COLLECTION_ID;
use cataloging::{
    build_items, build_seasonal_item, build_tile_collection, build_tile_outcome,
    create_root_catalog, create_stac_item, group_tile_assets, merge_outcomes,
    parse_grouping_key, parse_item_key, unique_tiles, TileOutcome, DATA_ASSET_KEY,
};
use stac_common::{mission_interval, Polarization, Season, StacError, TileId};
use test_utils::{keys, tile_listing, tile_prefix, urls};

// ============================================================================
// Filename parsing
// ============================================================================

#[test]
fn test_parse_yearly_key() {
    let asset = parse_item_key("N00E005_124D_inc.tif").unwrap();

    assert_eq!(asset.product, "inc");
    assert_eq!(asset.tile.as_str(), "N00E005");
    assert_eq!(asset.orbit.as_deref(), Some("124D"));
    assert!(asset.season().is_none());
    assert!(asset.polarization().is_none());
}

#[test]
fn test_parse_seasonal_key() {
    let asset = parse_item_key("N00E005_fall_vh_AMP.tif").unwrap();
    let seasonal = asset.seasonal.as_ref().unwrap();

    assert_eq!(asset.product, "AMP");
    assert_eq!(seasonal.season, Season::Fall);
    assert_eq!(seasonal.label, "fall");
    assert_eq!(seasonal.polarization, Polarization::VH);
    assert_eq!(seasonal.date_range, Season::Fall.date_range());
    assert_eq!(seasonal.datetime, Season::Fall.midpoint());
}

#[test]
fn test_parse_errors_are_classified() {
    assert!(matches!(
        parse_item_key(keys::MALFORMED_TWO_TOKENS),
        Err(StacError::Format(_))
    ));
    assert!(matches!(
        parse_item_key(keys::UNKNOWN_SEASON),
        Err(StacError::Lookup(_))
    ));
    assert!(matches!(parse_item_key(keys::BAD_TILE), Err(StacError::Format(_))));
    assert!(matches!(
        parse_item_key("data/tiles/N00E005/N00E005_a_b_c_d.tif"),
        Err(StacError::Format(_))
    ));
}

#[test]
fn test_grouping_parse_uppercases_tokens() {
    let asset = parse_grouping_key(keys::N00E005_INC).unwrap();
    assert_eq!(asset.product, "INC");
}

// ============================================================================
// Single-item mode
// ============================================================================

#[test]
fn test_yearly_item_spans_mission() {
    let item = create_stac_item(keys::N00E005_INC, urls::FOO).unwrap();
    let mission = mission_interval();

    assert_eq!(item.id, "N00E005_124D_inc");
    assert_eq!(item.collection.as_deref(), Some(COLLECTION_ID));
    assert_eq!(item.bbox, [5.0, -1.0, 6.0, 0.0]);
    assert_eq!(item.properties.start_datetime, mission.start);
    assert_eq!(item.properties.end_datetime, mission.end);
    assert!(item.properties.datetime.is_none());
    assert!(item.properties.season.is_none());
    assert_eq!(item.properties.sar.product_type, "inc");
    assert_eq!(
        item.assets[DATA_ASSET_KEY].href,
        "foo.com/data/tiles/N00E005/N00E005_124D_inc.tif"
    );
}

#[test]
fn test_item_geometry_ring() {
    let item = create_stac_item(keys::N00E005_INC, urls::FOO).unwrap();
    assert_eq!(
        item.geometry.coordinates[0],
        vec![[6.0, -1.0], [6.0, 0.0], [5.0, 0.0], [5.0, -1.0], [6.0, -1.0]]
    );
}

#[test]
fn test_seasonal_item_narrows_range() {
    let item = create_stac_item(keys::S78W078_SUMMER_HH_AMP, urls::BAR).unwrap();
    let props = &item.properties;

    assert_eq!(item.bbox, [-78.0, -79.0, -77.0, -78.0]);
    assert_eq!(props.season.as_deref(), Some("summer"));
    assert_eq!(props.start_datetime, Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());
    assert_eq!(props.end_datetime, Utc.with_ymd_and_hms(2020, 8, 31, 0, 0, 0).unwrap());
    assert_eq!(props.datetime, Some(Utc.with_ymd_and_hms(2020, 7, 16, 12, 0, 0).unwrap()));
    assert_eq!(props.sar.polarizations, vec!["HH".to_string()]);
}

#[test]
fn test_batch_isolates_malformed_keys() {
    let input = vec![
        keys::N00E005_INC,
        keys::MALFORMED_TWO_TOKENS,
        keys::N00E005_FALL_VH_AMP,
        keys::S78W078_SUMMER_HH_AMP,
    ];
    let report = build_items(input, urls::BUCKET);

    assert_eq!(report.succeeded.len(), 3);
    assert_eq!(report.failed_ids(), vec![keys::MALFORMED_TWO_TOKENS]);
    assert_eq!(report.failed[0].error.kind(), "format");
}

// ============================================================================
// Collection-grouping mode
// ============================================================================

#[test]
fn test_grouped_item_assets() {
    let listing = tile_listing("N00E011", "124D", &["winter"], &["vv", "vh"]);
    let tile = build_tile_collection(&listing).unwrap();

    assert_eq!(tile.items.len(), 1);
    let item = &tile.items[0];
    assert_eq!(item.id, "N00E011_WINTER");
    assert_eq!(item.collection.as_deref(), Some("N00E011"));
    assert_eq!(item.properties.season.as_deref(), Some("WINTER"));
    assert_eq!(item.properties.sar.product_type, "COH");
    assert_eq!(item.properties.sar.polarizations, vec!["VH", "VV"]);
    assert_eq!(item.assets.len(), 2 + 2 + 9);

    let coh = &item.assets["COH36_VV"];
    assert_eq!(coh.product.as_deref(), Some("COH"));
    assert_eq!(coh.temporal_separation.as_deref(), Some("36 days"));
    assert_eq!(coh.polarization.as_deref(), Some("VV"));

    let amp = &item.assets["AMP_VH"];
    assert_eq!(amp.product.as_deref(), Some("AMP"));
    assert!(amp.temporal_separation.is_none());

    assert_eq!(item.assets["RHO_VV"].product.as_deref(), Some("RHO"));
    assert!(item.assets["INC"].polarization.is_none());
    assert!(item.assets["LSMAP"].href.ends_with("N00E011_124D_lsmap.tif"));
}

#[test]
fn test_grouped_item_json() {
    let listing = tile_listing("N00E011", "124D", &["winter"], &["vv"]);
    let tile = build_tile_collection(&listing).unwrap();
    let json = serde_json::to_value(&tile.items[0]).unwrap();

    assert_eq!(json["collection"], "N00E011");
    assert_eq!(json["properties"]["datetime"], "2020-01-14T12:00:00Z");
    assert_eq!(json["properties"]["sar:product_type"], "COH");
    assert_eq!(
        json["assets"]["COH12_VV"],
        serde_json::json!({
            "href": "data/tiles/N00E011/N00E011_winter_vv_COH12.tif",
            "type": "image/tiff; application=geotiff",
            "polarization": "VV",
            "product": "COH",
            "temporal_separation": "12 days"
        })
    );
}

#[test]
fn test_grouped_item_datetime_is_range_midpoint() {
    let listing = tile_listing("N00E005", "124D", &["winter", "fall"], &["vv"]);
    let tile = build_tile_collection(&listing).unwrap();

    let ids: Vec<&str> = tile.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["N00E005_WINTER", "N00E005_FALL"]);
    assert_eq!(
        tile.items[0].properties.datetime,
        Some(Utc.with_ymd_and_hms(2020, 1, 14, 12, 0, 0).unwrap())
    );
    assert_eq!(
        tile.items[1].properties.datetime,
        Some(Utc.with_ymd_and_hms(2020, 10, 16, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_collection_extent_is_mission_interval() {
    let listing = tile_listing("S01E012", "051A", &["summer"], &["hh", "hv"]);
    let tile = build_tile_collection(&listing).unwrap();
    let interval = &tile.collection.extent.temporal.interval[0];

    assert_eq!(tile.collection.id, "S01E012");
    assert_eq!(tile.collection.description, "Sentinel-1 Coherence Tile S01E012");
    assert_eq!(interval[0].as_deref(), Some("2019-12-01T00:00:00Z"));
    assert_eq!(interval[1].as_deref(), Some("2020-11-30T00:00:00Z"));
    assert_eq!(tile.collection.extent.spatial.bbox, vec![vec![12.0, -2.0, 13.0, -1.0]]);
    assert!(tile.items.iter().all(|i| i.properties.tile == tile.collection.id));
}

#[test]
fn test_yearly_product_from_two_orbits_keeps_first() {
    let listing = [
        "data/tiles/N48W090/N48W090_001A_inc.tif",
        "data/tiles/N48W090/N48W090_172D_inc.tif",
        "data/tiles/N48W090/N48W090_fall_vv_AMP.tif",
    ];
    let tile = build_tile_collection(&listing).unwrap();
    let item = &tile.items[0];

    let asset_keys: Vec<&str> = item.assets.keys().map(String::as_str).collect();
    assert_eq!(asset_keys, vec!["AMP_VV", "INC"]);
    assert_eq!(item.assets["INC"].href, listing[0]);

    let parsed = listing
        .iter()
        .map(|key| parse_grouping_key(key).unwrap())
        .collect();
    let groups = group_tile_assets(parsed).unwrap();
    assert_eq!(groups.yearly.len(), 1);
    assert_eq!(groups.shadowed_yearly.len(), 1);
    assert_eq!(groups.shadowed_yearly[0].key, listing[1]);
}

#[test]
fn test_seasonal_item_ignores_repeated_yearly_product() {
    let yearly = vec![
        parse_grouping_key("data/tiles/N48W090/N48W090_001A_lsmap.tif").unwrap(),
        parse_grouping_key("data/tiles/N48W090/N48W090_172D_lsmap.tif").unwrap(),
    ];
    let seasonal = vec![parse_grouping_key("data/tiles/N48W090/N48W090_fall_vv_AMP.tif").unwrap()];

    let item = build_seasonal_item(&yearly, &seasonal).unwrap();

    assert_eq!(item.assets.len(), 2);
    assert!(item.assets["LSMAP"].href.ends_with("N48W090_001A_lsmap.tif"));
}

#[test]
fn test_tile_without_seasons_fails() {
    let listing = vec![keys::N00E005_INC, keys::N00E005_LSMAP];
    assert!(matches!(
        build_tile_collection(&listing),
        Err(StacError::Format(_))
    ));
}

#[test]
fn test_unexpected_yearly_product_fails() {
    let listing = vec![
        "data/tiles/N00E005/N00E005_124D_incidence.tif",
        keys::N00E005_FALL_VH_AMP,
    ];
    assert!(matches!(
        build_tile_collection(&listing),
        Err(StacError::Format(_))
    ));
}

// ============================================================================
// Catalog merge
// ============================================================================

#[test]
fn test_merge_keeps_good_tiles_and_reports_bad_ones() {
    let mut outcomes = Vec::new();
    for tile in ["N00E005", "N49E009", "S78W161"] {
        let listing = tile_listing(tile, "124D", &["spring", "fall"], &["vv", "vh"]);
        outcomes.push(build_tile_outcome(&tile_prefix(tile), &listing));
    }
    outcomes.push(build_tile_outcome("data/tiles/N0E005/", &[keys::BAD_TILE]));
    assert_eq!(outcomes.iter().filter(|o| o.is_built()).count(), 3);

    let (tree, failures) = merge_outcomes(create_root_catalog(), outcomes);

    assert_eq!(tree.collection_count(), 3);
    assert_eq!(tree.item_count(), 6);
    assert!(tree.collection("N49E009").is_some());
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, "data/tiles/N0E005/");
}

#[test]
fn test_merge_is_order_independent() {
    let build = |tile: &str| {
        build_tile_outcome(
            &tile_prefix(tile),
            &tile_listing(tile, "124D", &["summer"], &["vv"]),
        )
    };
    let (forward, _) = merge_outcomes(create_root_catalog(), vec![build("N00E005"), build("S01E012")]);
    let (backward, _) = merge_outcomes(create_root_catalog(), vec![build("S01E012"), build("N00E005")]);

    assert_eq!(forward, backward);
    let ids: Vec<&str> = forward.collections().map(|c| c.id()).collect();
    assert_eq!(ids, vec!["N00E005", "S01E012"]);
}

#[test]
fn test_failed_outcome_carries_cause() {
    match build_tile_outcome("data/tiles/N00E005/", &[keys::UNKNOWN_SEASON]) {
        TileOutcome::Failed { error, .. } => assert_eq!(error.kind(), "lookup"),
        TileOutcome::Built(_) => panic!("unknown season must not build"),
    }
}

// ============================================================================
// Tile discovery
// ============================================================================

#[test]
fn test_unique_tiles_from_keys() {
    let input = [
        keys::N00E005_INC,
        keys::N00E005_FALL_VH_AMP,
        keys::N00E011_WINTER_VV_COH36,
        keys::MALFORMED_TWO_TOKENS,
    ];
    let (tiles, report) = unique_tiles(input);

    let expected: Vec<TileId> = ["N00E005", "N00E011"]
        .iter()
        .map(|t| TileId::parse(t).unwrap())
        .collect();
    assert_eq!(tiles.into_iter().collect::<Vec<_>>(), expected);
    assert_eq!(report.failed_ids(), vec![keys::MALFORMED_TWO_TOKENS]);
}
