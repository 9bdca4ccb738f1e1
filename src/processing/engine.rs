// src/processing/engine.rs
//! Per-pixel dispatch and nodata propagation.

use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::processing::indices::{atmospheric, ratio, soil, tasseled_cap, BandSet, IndexKind};

/// Denominator floor for the NDVI nodata guard: pixels with
/// red + nir below this are masked rather than computed.
const NDVI_SUM_FLOOR: f64 = 0.001;

/// Aligned reflectance values for one pixel. `None` marks nodata; bands
/// not supplied for the run also read as `None` but are never consulted
/// for indices that do not require them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelBands {
    pub red: Option<f64>,
    pub nir: Option<f64>,
    pub green: Option<f64>,
    pub blue: Option<f64>,
    pub chan5: Option<f64>,
    pub chan7: Option<f64>,
}

/// One raster row per supplied band, reused across iterations.
#[derive(Debug, Default)]
pub struct RowBundle {
    pub red: Vec<Option<f64>>,
    pub nir: Vec<Option<f64>>,
    pub green: Option<Vec<Option<f64>>>,
    pub blue: Option<Vec<Option<f64>>>,
    pub chan5: Option<Vec<Option<f64>>>,
    pub chan7: Option<Vec<Option<f64>>>,
}

impl RowBundle {
    pub fn new(width: usize, supplied: BandSet) -> Self {
        let row = || Vec::with_capacity(width);
        Self {
            red: row(),
            nir: row(),
            green: supplied.green.then(row),
            blue: supplied.blue.then(row),
            chan5: supplied.chan5.then(row),
            chan7: supplied.chan7.then(row),
        }
    }

    pub fn pixel(&self, col: usize) -> PixelBands {
        PixelBands {
            red: self.red[col],
            nir: self.nir[col],
            green: self.green.as_ref().and_then(|row| row[col]),
            blue: self.blue.as_ref().and_then(|row| row[col]),
            chan5: self.chan5.as_ref().and_then(|row| row[col]),
            chan7: self.chan7.as_ref().and_then(|row| row[col]),
        }
    }
}

/// Dispatches one index over pixel bundles, propagating nodata.
#[derive(Debug)]
pub struct IndexEngine {
    kind: IndexKind,
}

impl IndexEngine {
    /// Validates the run configuration: every band the index requires must
    /// be supplied. Fails before any pixel is processed.
    pub fn new(kind: IndexKind, supplied: BandSet) -> Result<Self> {
        let missing = kind.optional_bands().missing_from(supplied);
        if !missing.is_empty() {
            bail!(
                "index {} requires the {} band(s), but no raster was supplied for them",
                kind,
                missing.join(", ")
            );
        }
        Ok(Self { kind })
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Computes the index for one pixel, or `None` when any required band
    /// carries nodata. Check order is fixed: red/nir first, then required
    /// optional bands, then the NDVI denominator guard.
    pub fn evaluate(&self, px: &PixelBands) -> Option<f64> {
        let red = px.red?;
        let nir = px.nir?;
        match self.kind {
            IndexKind::Sr => Some(ratio::sr(red, nir)),
            IndexKind::Ndvi => {
                if red + nir < NDVI_SUM_FLOOR {
                    None
                } else {
                    Some(ratio::ndvi(red, nir))
                }
            }
            IndexKind::Ipvi => Some(ratio::ipvi(red, nir)),
            IndexKind::Dvi => Some(ratio::dvi(red, nir)),
            IndexKind::Evi => Some(atmospheric::evi(px.blue?, red, nir)),
            IndexKind::Pvi => Some(soil::pvi(red, nir)),
            IndexKind::Wdvi => Some(soil::wdvi(red, nir)),
            IndexKind::Savi => Some(soil::savi(red, nir)),
            IndexKind::Msavi => Some(soil::msavi(red, nir)),
            IndexKind::Msavi2 => Some(soil::msavi2(red, nir)),
            IndexKind::Gemi => Some(atmospheric::gemi(red, nir)),
            IndexKind::Arvi => Some(atmospheric::arvi(red, nir, px.blue?)),
            IndexKind::Gvi => Some(tasseled_cap::gvi(
                px.blue?,
                px.green?,
                red,
                nir,
                px.chan5?,
                px.chan7?,
            )),
            IndexKind::Gari => Some(atmospheric::gari(red, nir, px.blue?, px.green?)),
        }
    }

    /// Evaluates a full row into `out`. Pixels are independent, so the row
    /// is fanned out over the rayon pool; output order is positional and
    /// therefore deterministic.
    pub fn evaluate_row(&self, rows: &RowBundle, out: &mut [Option<f64>]) {
        out.par_iter_mut().enumerate().for_each(|(col, cell)| {
            *cell = self.evaluate(&rows.pixel(col));
        });
    }
}
