// Adapters layer: concrete listing sources for the external data store.

pub mod source;

pub use source::{JsonFileSource, MemorySource};
