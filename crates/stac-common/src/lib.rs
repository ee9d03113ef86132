//! Common types and utilities shared across the coherence STAC crates.

pub mod bbox;
pub mod error;
pub mod polarization;
pub mod report;
pub mod season;
pub mod tile;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{StacError, StacResult};
pub use polarization::{Polarization, PolarizationParseError};
pub use report::{BatchReport, UnitFailure};
pub use season::{Season, SeasonParseError};
pub use tile::{tile_prefix, TileId, TileParseError, TILES_ROOT_PREFIX};
pub use time::{format_stac_datetime, mission_interval, parse_stac_datetime, DateRange};
