// src/io/color.rs
//! Grey color ramp for index visualization.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One stop of a linear color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampStop {
    pub value: f64,
    pub rgb: (u8, u8, u8),
}

/// Linear grey ramp: `lo` maps to black, `hi` to white. The stops are the
/// same for every index; only the data range varies (fixed-point output
/// scales the stops by the same factor as the samples).
pub fn grey_ramp(lo: f64, hi: f64) -> [RampStop; 2] {
    [
        RampStop {
            value: lo,
            rgb: (0, 0, 0),
        },
        RampStop {
            value: hi,
            rgb: (255, 255, 255),
        },
    ]
}

/// Renders ramp stops as GRASS color-rule lines ("value R:G:B").
pub fn ramp_rules(stops: &[RampStop]) -> String {
    let mut rules = String::new();
    for stop in stops {
        let (r, g, b) = stop.rgb;
        rules.push_str(&format!("{} {}:{}:{}\n", stop.value, r, g, b));
    }
    rules
}

/// Writes the ramp as a `.clr` sidecar next to the output raster and
/// returns its path.
pub fn write_ramp_file(output: &Path, stops: &[RampStop]) -> Result<PathBuf> {
    let path = output.with_extension("clr");
    fs::write(&path, ramp_rules(stops))
        .with_context(|| format!("unable to write color ramp {}", path.display()))?;
    Ok(path)
}
