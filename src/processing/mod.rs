// src/processing/mod.rs
pub mod engine;
pub mod indices;
pub mod processor;

// Re-export main components
pub use engine::{IndexEngine, PixelBands, RowBundle};
pub use processor::{BandPaths, IndexProcessor, OutputOptions};
