// Adapters layer: concrete sources the dataset loader can read from.

pub mod source;

pub use source::{source_for, FileSource, HttpSource};
