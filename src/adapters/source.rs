use crate::core::{ConfigProvider, DatasetSource};
use crate::utils::error::{FinderError, Result};
use crate::utils::validation::is_remote_location;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn location(&self) -> &str {
        &self.display
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| FinderError::load(&self.display, format!("Failed to read data file: {}", e)))
    }
}

pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making data request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("Data response status: {}", response.status());
        if !response.status().is_success() {
            return Err(FinderError::load(
                &self.url,
                format!("Failed to fetch data (HTTP {})", response.status()),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Picks the source matching the configured location.
pub fn source_for<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn DatasetSource>> {
    let location = config.data_location().trim();
    if is_remote_location(location) {
        let timeout = Duration::from_secs(config.timeout_seconds());
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
