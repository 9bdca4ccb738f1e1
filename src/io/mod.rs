// src/io/mod.rs
pub mod color;
pub mod reader;
pub mod writer;

pub use reader::{BandSource, GeoInfo};
pub use writer::IndexSink;
