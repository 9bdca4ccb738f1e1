// src/processing/processor.rs
use anyhow::{bail, Result};
use itertools::Itertools;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::io::reader::BandSource;
use crate::io::writer::{IndexSink, SinkOptions};
use crate::processing::engine::{IndexEngine, RowBundle};
use crate::processing::indices::{BandSet, IndexKind};
use crate::utils::progress::Progress;
use crate::VERSION;

/// Per-run raster identifiers for each reflectance channel. Red and nir
/// are mandatory; the rest are a run-level configuration state.
#[derive(Debug, Clone)]
pub struct BandPaths {
    pub red: PathBuf,
    pub nir: PathBuf,
    pub green: Option<PathBuf>,
    pub blue: Option<PathBuf>,
    pub chan5: Option<PathBuf>,
    pub chan7: Option<PathBuf>,
}

impl BandPaths {
    /// Resolves optional-band presence once, outside the pixel loop.
    pub fn supplied(&self) -> BandSet {
        BandSet {
            green: self.green.is_some(),
            blue: self.blue.is_some(),
            chan5: self.chan5.is_some(),
            chan7: self.chan7.is_some(),
        }
    }
}

/// Output shaping options shared by single runs and batch operations.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub float: bool,
    pub scale_factor: i32,
    pub compress: String,
    pub compress_level: u8,
    pub tiled: bool,
}

/// Open sources for every supplied band.
struct BandStack {
    red: BandSource,
    nir: BandSource,
    green: Option<BandSource>,
    blue: Option<BandSource>,
    chan5: Option<BandSource>,
    chan7: Option<BandSource>,
}

impl BandStack {
    fn open(paths: &BandPaths) -> Result<Self> {
        let open_opt = |p: &Option<PathBuf>| p.as_deref().map(BandSource::open).transpose();
        Ok(Self {
            red: BandSource::open(&paths.red)?,
            nir: BandSource::open(&paths.nir)?,
            green: open_opt(&paths.green)?,
            blue: open_opt(&paths.blue)?,
            chan5: open_opt(&paths.chan5)?,
            chan7: open_opt(&paths.chan7)?,
        })
    }

    fn sizes(&self) -> Vec<(usize, usize)> {
        let mut sizes = vec![self.red.size(), self.nir.size()];
        for source in [&self.green, &self.blue, &self.chan5, &self.chan7]
            .into_iter()
            .flatten()
        {
            sizes.push(source.size());
        }
        sizes
    }

    /// Reads row `row` of every supplied band into the reused bundle.
    fn read_row(&self, row: usize, rows: &mut RowBundle) -> Result<()> {
        self.red.read_row(row, &mut rows.red)?;
        self.nir.read_row(row, &mut rows.nir)?;
        if let (Some(source), Some(buf)) = (&self.green, rows.green.as_mut()) {
            source.read_row(row, buf)?;
        }
        if let (Some(source), Some(buf)) = (&self.blue, rows.blue.as_mut()) {
            source.read_row(row, buf)?;
        }
        if let (Some(source), Some(buf)) = (&self.chan5, rows.chan5.as_mut()) {
            source.read_row(row, buf)?;
        }
        if let (Some(source), Some(buf)) = (&self.chan7, rows.chan7.as_mut()) {
            source.read_row(row, buf)?;
        }
        Ok(())
    }
}

/// Row-at-a-time run driver: validate configuration, then read, evaluate
/// and write each row before touching the next.
pub struct IndexProcessor {
    options: OutputOptions,
}

impl IndexProcessor {
    pub fn new(options: OutputOptions) -> Self {
        Self { options }
    }

    pub fn process(&self, kind: IndexKind, bands: &BandPaths, output: &Path) -> Result<()> {
        // Required-band check comes first so a misconfigured run fails
        // before any raster is opened.
        let engine = IndexEngine::new(kind, bands.supplied())?;

        let stack = BandStack::open(bands)?;
        let sizes = stack.sizes();
        if !sizes.iter().all_equal() {
            bail!("input bands disagree on raster size: {:?}", sizes);
        }

        let geo = stack.red.geo_info()?;
        let sink_opts = SinkOptions {
            use_fixed_point: !self.options.float,
            scale_factor: self.options.scale_factor,
            compress: &self.options.compress,
            compress_level: self.options.compress_level,
            tiled: self.options.tiled,
        };
        let mut sink = IndexSink::create(output, &geo, kind.description(), &sink_opts)?;

        let mut rows = RowBundle::new(geo.width, bands.supplied());
        let mut result = vec![None; geo.width];
        let mut progress = Progress::new(geo.height);

        for row in 0..geo.height {
            progress.update(row);
            stack.read_row(row, &mut rows)?;
            engine.evaluate_row(&rows, &mut result);
            sink.write_row(row, &result)?;
        }
        progress.finish();

        sink.finish(&history(engine.kind(), bands, output))
    }
}

/// Resolved run configuration, recorded in the output metadata.
fn history(kind: IndexKind, bands: &BandPaths, output: &Path) -> String {
    let mut h = format!(
        "vi-calc {} index={} red={} nir={}",
        VERSION,
        kind,
        bands.red.display(),
        bands.nir.display()
    );
    for (name, path) in [
        ("green", &bands.green),
        ("blue", &bands.blue),
        ("chan5", &bands.chan5),
        ("chan7", &bands.chan7),
    ] {
        if let Some(path) = path {
            let _ = write!(h, " {}={}", name, path.display());
        }
    }
    let _ = write!(h, " output={}", output.display());
    h
}
