// src/processing/indices/mod.rs
pub mod atmospheric;
pub mod ratio;
pub mod soil;
pub mod tasseled_cap;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Vegetation index selector, fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Sr,
    Ndvi,
    Ipvi,
    Dvi,
    Evi,
    Pvi,
    Wdvi,
    Savi,
    Msavi,
    Msavi2,
    Gemi,
    Arvi,
    Gvi,
    Gari,
}

impl IndexKind {
    /// Short lowercase key, as accepted on the command line and in batch configs.
    pub fn key(&self) -> &'static str {
        match self {
            IndexKind::Sr => "sr",
            IndexKind::Ndvi => "ndvi",
            IndexKind::Ipvi => "ipvi",
            IndexKind::Dvi => "dvi",
            IndexKind::Evi => "evi",
            IndexKind::Pvi => "pvi",
            IndexKind::Wdvi => "wdvi",
            IndexKind::Savi => "savi",
            IndexKind::Msavi => "msavi",
            IndexKind::Msavi2 => "msavi2",
            IndexKind::Gemi => "gemi",
            IndexKind::Arvi => "arvi",
            IndexKind::Gvi => "gvi",
            IndexKind::Gari => "gari",
        }
    }

    /// Full index name, used as the output band description.
    pub fn description(&self) -> &'static str {
        match self {
            IndexKind::Sr => "Simple Ratio",
            IndexKind::Ndvi => "Normalized Difference Vegetation Index",
            IndexKind::Ipvi => "Infrared Percentage Vegetation Index",
            IndexKind::Dvi => "Difference Vegetation Index",
            IndexKind::Evi => "Enhanced Vegetation Index",
            IndexKind::Pvi => "Perpendicular Vegetation Index",
            IndexKind::Wdvi => "Weighted Difference Vegetation Index",
            IndexKind::Savi => "Soil Adjusted Vegetation Index",
            IndexKind::Msavi => "Modified Soil Adjusted Vegetation Index",
            IndexKind::Msavi2 => "Second Modified Soil Adjusted Vegetation Index",
            IndexKind::Gemi => "Global Environmental Monitoring Index",
            IndexKind::Arvi => "Atmospherically Resistant Vegetation Index",
            IndexKind::Gvi => "Green Vegetation Index",
            IndexKind::Gari => "Green Atmospherically Resistant Vegetation Index",
        }
    }

    /// Optional bands consumed beyond the always-required red and nir.
    pub fn optional_bands(&self) -> BandSet {
        match self {
            IndexKind::Evi | IndexKind::Arvi => BandSet {
                blue: true,
                ..BandSet::NONE
            },
            IndexKind::Gari => BandSet {
                blue: true,
                green: true,
                ..BandSet::NONE
            },
            IndexKind::Gvi => BandSet {
                green: true,
                blue: true,
                chan5: true,
                chan7: true,
            },
            _ => BandSet::NONE,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Presence flags for the four optional reflectance bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandSet {
    pub green: bool,
    pub blue: bool,
    pub chan5: bool,
    pub chan7: bool,
}

impl BandSet {
    pub const NONE: Self = Self {
        green: false,
        blue: false,
        chan5: false,
        chan7: false,
    };

    /// Names of the bands required by `self` but absent from `supplied`.
    pub fn missing_from(&self, supplied: BandSet) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.green && !supplied.green {
            missing.push("green");
        }
        if self.blue && !supplied.blue {
            missing.push("blue");
        }
        if self.chan5 && !supplied.chan5 {
            missing.push("chan5");
        }
        if self.chan7 && !supplied.chan7 {
            missing.push("chan7");
        }
        missing
    }
}
