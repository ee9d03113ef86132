//! SAR polarization channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Polarization {
    HH,
    HV,
    VH,
    VV,
}

impl Polarization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarization::HH => "HH",
            Polarization::HV => "HV",
            Polarization::VH => "VH",
            Polarization::VV => "VV",
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarization {
    type Err = PolarizationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HH" => Ok(Polarization::HH),
            "HV" => Ok(Polarization::HV),
            "VH" => Ok(Polarization::VH),
            "VV" => Ok(Polarization::VV),
            _ => Err(PolarizationParseError::Unknown(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolarizationParseError {
    #[error("Unknown polarization: {0}. Expected one of HH, HV, VH, VV")]
    Unknown(String),
}
