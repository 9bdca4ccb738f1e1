// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::processing::indices::IndexKind;

#[derive(Parser)]
#[command(name = "vi-calc")]
#[command(version, about = "Vegetation index calculator for surface reflectance rasters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output file path
    #[arg(short, long, default_value = "output.tif", global = true)]
    pub output: PathBuf,

    /// Write float64 output instead of scaled int16
    #[arg(long, global = true)]
    pub float: bool,

    /// Scaling factor for fixed-point output
    #[arg(long, default_value = "10000", global = true)]
    pub scale_factor: i32,

    /// Compression algorithm (NONE, DEFLATE, ZSTD, LZW, ...)
    #[arg(long, default_value = "DEFLATE", global = true)]
    pub compress: String,

    /// Compression level for DEFLATE/ZSTD
    #[arg(long, default_value = "6", global = true)]
    pub compress_level: u8,

    /// Write a tiled raster
    #[arg(long, global = true)]
    pub tiled: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute one vegetation index from reflectance bands
    Vi {
        /// Vegetation index to compute
        #[arg(short, long, value_enum, default_value_t = IndexKind::Ndvi)]
        index: IndexKind,

        /// Red channel surface reflectance map, range [0.0;1.0]
        #[arg(short, long)]
        red: PathBuf,

        /// Nir channel surface reflectance map, range [0.0;1.0]
        #[arg(short, long)]
        nir: PathBuf,

        /// Green channel surface reflectance map (gvi, gari)
        #[arg(long)]
        green: Option<PathBuf>,

        /// Blue channel surface reflectance map (evi, arvi, gvi, gari)
        #[arg(long)]
        blue: Option<PathBuf>,

        /// Chan5 surface reflectance map (gvi)
        #[arg(long)]
        chan5: Option<PathBuf>,

        /// Chan7 surface reflectance map (gvi)
        #[arg(long)]
        chan7: Option<PathBuf>,
    },

    /// Run several index computations from a JSON config
    Batch {
        /// Batch configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}
