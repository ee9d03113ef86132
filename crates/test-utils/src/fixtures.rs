//! Common test fixtures for the coherence STAC tests.
//!
//! Keys follow the public bucket layout: `data/tiles/{tile}/{basename}`.

/// Object keys as they appear in the bucket.
pub mod keys {
    /// Yearly incidence angle raster (3-token basename).
    pub const N00E005_INC: &str = "data/tiles/N00E005/N00E005_124D_inc.tif";

    /// Yearly land/sea mask (3-token basename).
    pub const N00E005_LSMAP: &str = "data/tiles/N00E005/N00E005_124D_lsmap.tif";

    /// Seasonal backscatter amplitude, lower-case season and polarization.
    pub const N00E005_FALL_VH_AMP: &str = "data/tiles/N00E005/N00E005_fall_vh_AMP.tif";

    /// Seasonal 36-day coherence.
    pub const N00E011_WINTER_VV_COH36: &str = "data/tiles/N00E011/N00E011_winter_vv_COH36.tif";

    /// Southern/western hemisphere seasonal amplitude.
    pub const S78W078_SUMMER_HH_AMP: &str = "data/tiles/S78W078/S78W078_summer_hh_AMP.tif";

    /// Two-token basename; never valid.
    pub const MALFORMED_TWO_TOKENS: &str = "data/tiles/N00E005/N00E005_inc.tif";

    /// Four tokens with a season missing from the season table.
    pub const UNKNOWN_SEASON: &str = "data/tiles/N00E005/N00E005_monsoon_vv_AMP.tif";

    /// Four tokens with a broken tile id.
    pub const BAD_TILE: &str = "data/tiles/N0E005/N0E005_fall_vv_AMP.tif";
}

/// Base URLs used when resolving keys into hrefs.
pub mod urls {
    pub const FOO: &str = "foo.com/";
    pub const BAR: &str = "bar.com/";
    pub const BUCKET: &str =
        "https://sentinel-1-global-coherence-earthbigdata.s3.us-west-2.amazonaws.com/";
}

/// Common tile ids with their expected bounds `(min_x, min_y, max_x, max_y)`.
pub mod tiles {
    pub const N00E005: (&str, (f64, f64, f64, f64)) = ("N00E005", (5.0, -1.0, 6.0, 0.0));
    pub const N49E009: (&str, (f64, f64, f64, f64)) = ("N49E009", (9.0, 48.0, 10.0, 49.0));
    pub const N48W090: (&str, (f64, f64, f64, f64)) = ("N48W090", (-90.0, 47.0, -89.0, 48.0));
    pub const S01E012: (&str, (f64, f64, f64, f64)) = ("S01E012", (12.0, -2.0, 13.0, -1.0));
    pub const S78W161: (&str, (f64, f64, f64, f64)) =
        ("S78W161", (-161.0, -79.0, -160.0, -78.0));
}

/// Product codes present in the dataset.
pub mod products {
    /// Coherence products by repeat interval.
    pub const COHERENCE: [&str; 6] = ["COH06", "COH12", "COH18", "COH24", "COH36", "COH48"];

    /// Decay model parameters.
    pub const DECAY_MODEL: [&str; 3] = ["rho", "rmse", "tau"];

    /// Products produced once per year per orbit.
    pub const YEARLY: [&str; 2] = ["inc", "lsmap"];
}
