// src/batch.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::processing::indices::IndexKind;
use crate::processing::{BandPaths, IndexProcessor, OutputOptions};

#[derive(Deserialize, Serialize, Debug)]
pub struct BatchConfig {
    #[serde(default)]
    pub global: GlobalParams,
    pub operations: Vec<Operation>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GlobalParams {
    #[serde(default = "default_compress")]
    pub compress: String,
    #[serde(default = "default_compress_level")]
    pub compress_level: u8,
    #[serde(default)]
    pub float: bool,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: i32,
    #[serde(default = "default_true")]
    pub tiled: bool,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            compress: default_compress(),
            compress_level: default_compress_level(),
            float: false,
            scale_factor: default_scale_factor(),
            tiled: default_true(),
        }
    }
}

fn default_compress() -> String {
    "DEFLATE".to_string()
}

fn default_compress_level() -> u8 {
    6
}

fn default_scale_factor() -> i32 {
    10000
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Operation {
    pub index: IndexKind,
    pub bands: BandFiles,
    pub output: String,
    pub float: Option<bool>,
    pub scale_factor: Option<i32>,
    pub compress: Option<String>,
    pub compress_level: Option<u8>,
    pub tiled: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct BandFiles {
    pub red: String,
    pub nir: String,
    pub green: Option<String>,
    pub blue: Option<String>,
    pub chan5: Option<String>,
    pub chan7: Option<String>,
}

impl BandFiles {
    pub fn to_paths(&self) -> BandPaths {
        BandPaths {
            red: PathBuf::from(&self.red),
            nir: PathBuf::from(&self.nir),
            green: self.green.as_ref().map(PathBuf::from),
            blue: self.blue.as_ref().map(PathBuf::from),
            chan5: self.chan5.as_ref().map(PathBuf::from),
            chan7: self.chan7.as_ref().map(PathBuf::from),
        }
    }
}

pub fn process_batch(config_path: &Path) -> Result<()> {
    let config_content = fs::read_to_string(config_path)
        .with_context(|| format!("unable to read batch config {}", config_path.display()))?;
    let config: BatchConfig = serde_json::from_str(&config_content)
        .with_context(|| format!("invalid batch config {}", config_path.display()))?;

    println!(
        "Starting batch processing with {} operations...",
        config.operations.len()
    );

    for (i, op) in config.operations.iter().enumerate() {
        println!(
            "[{}/{}] Processing {} -> {}",
            i + 1,
            config.operations.len(),
            op.index,
            op.output
        );

        // Operation-specific settings override the globals.
        let options = OutputOptions {
            float: op.float.unwrap_or(config.global.float),
            scale_factor: op.scale_factor.unwrap_or(config.global.scale_factor),
            compress: op
                .compress
                .clone()
                .unwrap_or_else(|| config.global.compress.clone()),
            compress_level: op.compress_level.unwrap_or(config.global.compress_level),
            tiled: op.tiled.unwrap_or(config.global.tiled),
        };

        IndexProcessor::new(options).process(
            op.index,
            &op.bands.to_paths(),
            Path::new(&op.output),
        )?;
    }

    println!("Batch processing complete!");
    Ok(())
}
