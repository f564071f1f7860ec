pub mod export;

pub use export::{render, BoardExporter, OutputFormat};
