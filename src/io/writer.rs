// src/io/writer.rs
use anyhow::{anyhow, Result};
use gdal::raster::{Buffer, RasterCreationOptions};
use gdal::{Dataset, DriverManager, DriverType, Metadata};
use std::path::{Path, PathBuf};

use super::color::{grey_ramp, write_ramp_file};
use super::reader::GeoInfo;
use crate::utils::fixed_point::to_fixed_point;

/// Nodata marker for float output.
pub const NODATA_FLOAT: f64 = -999.0;
/// Nodata marker for scaled int16 output.
pub const NODATA_INT: i16 = -10000;

/// Output shaping shared by single runs and batch operations.
pub struct SinkOptions<'a> {
    pub use_fixed_point: bool,
    pub scale_factor: i32,
    pub compress: &'a str,
    pub compress_level: u8,
    pub tiled: bool,
}

/// Row-by-row writer for the computed index raster.
pub struct IndexSink {
    dataset: Dataset,
    path: PathBuf,
    width: usize,
    use_fixed_point: bool,
    scale_factor: i32,
}

impl IndexSink {
    pub fn create(
        path: &Path,
        geo: &GeoInfo,
        description: &str,
        opts: &SinkOptions,
    ) -> Result<Self> {
        let driver =
            DriverManager::get_output_driver_for_dataset_name(&*path.to_string_lossy(), DriverType::Raster)
                .ok_or_else(|| anyhow!("no raster driver found for output {}", path.display()))?;

        let mut options = Vec::new();
        if opts.compress.to_uppercase() != "NONE" {
            options.push(format!("COMPRESS={}", opts.compress.to_uppercase()));
            match opts.compress.to_uppercase().as_str() {
                "DEFLATE" => options.push(format!("ZLEVEL={}", opts.compress_level.min(9))),
                "ZSTD" => options.push(format!("ZSTD_LEVEL={}", opts.compress_level.min(22))),
                _ => {}
            }
        }
        if opts.tiled {
            options.push("TILED=YES".to_string());
        }
        options.push("NUM_THREADS=ALL_CPUS".to_string());
        let creation_options = RasterCreationOptions::from_iter(options);

        let mut dataset = if opts.use_fixed_point {
            driver.create_with_band_type_with_options::<i16, _>(
                path,
                geo.width,
                geo.height,
                1,
                &creation_options,
            )?
        } else {
            driver.create_with_band_type_with_options::<f64, _>(
                path,
                geo.width,
                geo.height,
                1,
                &creation_options,
            )?
        };

        dataset.set_projection(&geo.projection)?;
        dataset.set_geo_transform(&geo.geo_transform)?;

        let mut band = dataset.rasterband(1)?;
        if opts.use_fixed_point {
            band.set_no_data_value(Some(NODATA_INT as f64))?;
            band.set_metadata_item("SCALE", &format!("{}", 1.0 / opts.scale_factor as f64), "")?;
            band.set_metadata_item("OFFSET", "0", "")?;
            band.set_description(&format!(
                "{} (scaled by {})",
                description, opts.scale_factor
            ))?;
        } else {
            band.set_no_data_value(Some(NODATA_FLOAT))?;
            band.set_description(description)?;
        }
        drop(band);

        Ok(Self {
            dataset,
            path: path.to_path_buf(),
            width: geo.width,
            use_fixed_point: opts.use_fixed_point,
            scale_factor: opts.scale_factor,
        })
    }

    /// Writes one output row; `None` cells become the nodata marker.
    pub fn write_row(&mut self, row: usize, values: &[Option<f64>]) -> Result<()> {
        let mut band = self.dataset.rasterband(1)?;
        if self.use_fixed_point {
            let data = to_fixed_point(values, self.scale_factor, NODATA_INT);
            let mut buffer = Buffer::new((self.width, 1), data);
            band.write((0, row as isize), (self.width, 1), &mut buffer)?;
        } else {
            let data: Vec<f64> = values.iter().map(|v| v.unwrap_or(NODATA_FLOAT)).collect();
            let mut buffer = Buffer::new((self.width, 1), data);
            band.write((0, row as isize), (self.width, 1), &mut buffer)?;
        }
        Ok(())
    }

    /// Records the processing history, writes the grey color ramp sidecar
    /// and flushes the dataset. Consumes the sink; nothing may be written
    /// after the history.
    pub fn finish(mut self, history: &str) -> Result<()> {
        self.dataset
            .set_metadata_item("PROCESSING_HISTORY", history, "")?;
        let (lo, hi) = if self.use_fixed_point {
            let scale = self.scale_factor as f64;
            (-scale, scale)
        } else {
            (-1.0, 1.0)
        };
        write_ramp_file(&self.path, &grey_ramp(lo, hi))?;
        self.dataset.flush_cache()?;
        Ok(())
    }
}
