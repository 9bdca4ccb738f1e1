// src/main.rs
use anyhow::Result;
use clap::Parser;

use vi_calc::batch::process_batch;
use vi_calc::cli::{Cli, Commands};
use vi_calc::processing::{BandPaths, IndexProcessor, OutputOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Vi {
            index,
            red,
            nir,
            green,
            blue,
            chan5,
            chan7,
        } => {
            let bands = BandPaths {
                red: red.clone(),
                nir: nir.clone(),
                green: green.clone(),
                blue: blue.clone(),
                chan5: chan5.clone(),
                chan7: chan7.clone(),
            };
            let options = OutputOptions {
                float: cli.float,
                scale_factor: cli.scale_factor,
                compress: cli.compress.clone(),
                compress_level: cli.compress_level,
                tiled: cli.tiled,
            };
            IndexProcessor::new(options).process(*index, &bands, &cli.output)?;
            println!("Processing complete: {}", cli.output.display());
        }
        Commands::Batch { config } => process_batch(config)?,
    }

    Ok(())
}
