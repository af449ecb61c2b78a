use crate::core::{Dataset, DatasetSource};
use crate::utils::error::{FinderError, Result};
use chrono::{DateTime, Utc};

/// A dataset together with where and when it was loaded.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

/// Fetches and parses the college document exactly once.
pub struct DatasetLoader<S: DatasetSource + ?Sized> {
    source: Box<S>,
}

impl<S: DatasetSource + ?Sized> DatasetLoader<S> {
    pub fn new(source: Box<S>) -> Self {
        Self { source }
    }

    /// No retry: any fetch or parse failure is terminal and nothing partial is returned.
    pub async fn load(&self) -> Result<LoadedDataset> {
        let location = self.source.location().to_string();
        tracing::info!("Loading college data from {}", location);

        let bytes = self.source.fetch().await?;
        tracing::debug!("Fetched {} bytes", bytes.len());

        let dataset = Dataset::from_json_slice(&bytes)
            .map_err(|e| FinderError::load(&location, format!("invalid college data: {}", e)))?;

        for issue in dataset.validate() {
            tracing::warn!("Data quality: {}", issue);
        }

        tracing::info!(
            "Loaded {} institutes with {} branches",
            dataset.len(),
            dataset.branch_count()
        );

        Ok(LoadedDataset {
            dataset,
            source: location,
            loaded_at: Utc::now(),
        })
    }
}
