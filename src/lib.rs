pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command};

pub use crate::adapters::{source_for, FileSource, HttpSource};
pub use crate::config::{OutputFormat, Settings};
pub use crate::core::loader::{DatasetLoader, LoadedDataset};
pub use crate::core::query::{categories, eligible, institutes, lookup, min_rank};
pub use crate::domain::model::Dataset;
pub use crate::utils::error::{FinderError, Result};
