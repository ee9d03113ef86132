//! Static dataset configuration.
//!
//! Sensor constants, identifiers and descriptive text for the global
//! seasonal Sentinel-1 coherence dataset. Everything here is fixed for the
//! life of the process.

use stac_protocol::SarProperties;

pub use stac_common::tile::{tile_prefix, TILES_ROOT_PREFIX};

/// Id of the root catalog.
pub const CATALOG_ID: &str = "sentinel-1-global-coherence-earthbigdata";

/// Parent collection of items built one file at a time.
pub const COLLECTION_ID: &str = "sentinel-1-global-coherence";

/// Public bucket holding the dataset.
pub const DATASET_BUCKET: &str = "sentinel-1-global-coherence-earthbigdata";

/// SPDX id of the data license.
pub const LICENSE_ID: &str = "CC-BY-4.0";

pub const LICENSE: &str = "Creative Commons Attribution 4.0 International Public License";

pub const DATA_CITATION: &str = "Kellndorfer, J. , O. Cartus, M. Lavalle,  C. Magnard, P. Milillo, S. Oveisgharan, B. Osmanoglu, \
P. Rosen, and U. Wegmuller. 2022. Global seasonal Sentinel-1 interferometric coherence and backscatter data set. \
[Indicate subset used]. Fairbanks, Alaska USA. NASA Alaska Satellite Facility Synthetic Aperture Radar \
Distributed Active Archive Center. doi: https://doi.org/10.5067/8W33RRS6S2RV. [Date Accessed].";

pub const LITERATURE_CITATION: &str = "Kellndorfer, J. , O. Cartus, M. Lavalle,  C. Magnard, P. Milillo, S. Oveisgharan, B. \
Osmanoglu, P. Rosen, and U. Wegmuller. 2022. Global seasonal Sentinel-1 interferometric coherence and \
backscatter data set., Scientific Data. https://doi.org/10.1038/s41597-022-01189-6";

pub const DESCRIPTION: &str = "This data set is the first-of-its-kind spatial representation of multi-seasonal, global C-band \
Synthetic Aperture Radar (SAR) interferometric repeat-pass coherence and backscatter signatures. Coverage \
comprises land masses and ice sheets from 82° Northern to 79° Southern latitudes. The data set is derived from \
multi-temporal repeat-pass interferometric processing of about 205,000 Sentinel-1 C-band SAR images acquired in \
Interferometric Wide-Swath Mode from 1-Dec-2019 to 30-Nov-2020. The data set encompasses three sets of seasonal \
(December-February, March-May, June-August, September-November) metrics produced with a pixel spacing of three \
arcseconds: 1) Median 6-, 12-, 18-, 24-, 36-, and 48-days repeat-pass coherence at VV or HH polarizations, 2) \
Mean radiometrically terrain corrected backscatter (γ0) at VV and VH, or HH and HV polarizations, and 3) \
Estimated parameters of an exponential coherence decay model. The data set has been produced to obtain global, \
spatially detailed information on how decorrelation affects interferometric measurements of surface displacement \
and is rich in spatial and temporal information for a variety of mapping applications.";

/// Latitude coverage of the dataset.
pub const COVERAGE_NORTH: f64 = 82.0;
pub const COVERAGE_SOUTH: f64 = -79.0;

/// Products delivered once per orbit rather than per season.
pub const YEARLY_PRODUCTS: [&str; 2] = ["INC", "LSMAP"];

/// Product tag of the coherence rasters; the full code carries the
/// repeat interval in days as a suffix (`COH06` .. `COH48`).
pub const COHERENCE_PRODUCT: &str = "COH";

/// Radar configuration of the sensor family being cataloged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarConfig {
    pub instrument_mode: &'static str,
    pub frequency_band: &'static str,
    /// GHz
    pub center_frequency: f64,
    pub looks_range: u32,
    pub looks_azimuth: u32,
    pub observation_direction: &'static str,
}

/// Sentinel-1 Interferometric Wide-Swath mode as processed for this dataset.
pub const SENTINEL1: SarConfig = SarConfig {
    instrument_mode: "IW",
    frequency_band: "C",
    center_frequency: 5.405,
    looks_range: 12,
    looks_azimuth: 3,
    observation_direction: "right",
};

impl SarConfig {
    /// SAR extension properties for one product type and polarization list.
    pub fn properties(&self, product_type: &str, polarizations: Vec<String>) -> SarProperties {
        SarProperties {
            instrument_mode: self.instrument_mode.to_string(),
            frequency_band: self.frequency_band.to_string(),
            center_frequency: self.center_frequency,
            polarizations,
            product_type: product_type.to_string(),
            looks_range: self.looks_range,
            looks_azimuth: self.looks_azimuth,
            observation_direction: self.observation_direction.to_string(),
        }
    }
}

/// Whether a product code names a yearly product. Exact match, any case.
pub fn is_yearly_product(product: &str) -> bool {
    YEARLY_PRODUCTS
        .iter()
        .any(|yearly| yearly.eq_ignore_ascii_case(product))
}
