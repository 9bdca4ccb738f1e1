// src/io/reader.rs
use anyhow::{Context, Result};
use gdal::Dataset;
use std::path::Path;

/// Georeferencing carried from the first input band to the output.
pub struct GeoInfo {
    pub projection: String,
    pub geo_transform: [f64; 6],
    pub width: usize,
    pub height: usize,
}

/// Read-only handle on one single-band reflectance raster.
pub struct BandSource {
    dataset: Dataset,
    nodata: Option<f64>,
    width: usize,
    height: usize,
}

impl BandSource {
    pub fn open(path: &Path) -> Result<Self> {
        let dataset = Dataset::open(path)
            .with_context(|| format!("unable to open raster map {}", path.display()))?;
        let (width, height) = dataset.raster_size();
        let nodata = dataset.rasterband(1)?.no_data_value();
        Ok(Self {
            dataset,
            nodata,
            width,
            height,
        })
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn geo_info(&self) -> Result<GeoInfo> {
        let geo_transform = self
            .dataset
            .geo_transform()
            .context("input raster has no geotransform")?;
        Ok(GeoInfo {
            projection: self.dataset.projection(),
            geo_transform: geo_transform
                .try_into()
                .map_err(|_| anyhow::anyhow!("unexpected geotransform shape"))?,
            width: self.width,
            height: self.height,
        })
    }

    /// Reads one row into `out`, mapping the band's registered nodata
    /// marker (and NaN) to `None`.
    pub fn read_row(&self, row: usize, out: &mut Vec<Option<f64>>) -> Result<()> {
        let band = self.dataset.rasterband(1)?;
        let buffer = band
            .read_as::<f64>((0, row as isize), (self.width, 1), (self.width, 1), None)
            .with_context(|| format!("unable to read raster row {}", row))?;
        out.clear();
        out.extend(buffer.data().iter().map(|&v| {
            if v.is_nan() || self.nodata.map_or(false, |nd| v == nd) {
                None
            } else {
                Some(v)
            }
        }));
        Ok(())
    }
}
