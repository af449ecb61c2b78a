use anyhow::Result;
use college_finder::config::Overrides;
use college_finder::{source_for, DatasetLoader, FinderError, Settings};
use httpmock::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = include_str!("../data/college_data.json");

fn settings_for(location: String) -> Settings {
    let overrides = Overrides {
        data: Some(location),
        ..Overrides::default()
    };
    Settings::resolve_with_env(&overrides, None, None)
}

#[tokio::test]
async fn test_load_from_http() -> Result<()> {
    let server = MockServer::start();
    let data_mock = server.mock(|when, then| {
        when.method(GET).path("/college_data.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(SAMPLE);
    });

    let settings = settings_for(server.url("/college_data.json"));
    let loaded = DatasetLoader::new(source_for(&settings)?).load().await?;

    data_mock.assert();
    assert_eq!(loaded.dataset.len(), 3);
    assert_eq!(loaded.source, server.url("/college_data.json"));
    Ok(())
}

#[tokio::test]
async fn test_http_error_status_is_load_failure() -> Result<()> {
    let server = MockServer::start();
    let data_mock = server.mock(|when, then| {
        when.method(GET).path("/missing.json");
        then.status(404);
    });

    let settings = settings_for(server.url("/missing.json"));
    let err = DatasetLoader::new(source_for(&settings)?)
        .load()
        .await
        .unwrap_err();

    // Exactly one attempt; no retry.
    data_mock.assert_hits(1);
    assert!(matches!(err, FinderError::LoadError { .. }));
    assert_eq!(err.exit_code(), 3);
    Ok(())
}

#[tokio::test]
async fn test_http_body_not_json_is_load_failure() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/college_data.json");
        then.status(200).body("<html>not json</html>");
    });

    let settings = settings_for(server.url("/college_data.json"));
    let result = DatasetLoader::new(source_for(&settings)?).load().await;
    assert!(matches!(result, Err(FinderError::LoadError { .. })));
    Ok(())
}

#[tokio::test]
async fn test_load_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("college_data.json");
    tokio::fs::write(&path, SAMPLE).await?;

    let settings = settings_for(path.to_string_lossy().to_string());
    let loaded = DatasetLoader::new(source_for(&settings)?).load().await?;

    assert_eq!(loaded.dataset.branch_count(), 5);
    assert!(loaded.dataset.validate().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_file_is_load_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("absent.json");

    let settings = settings_for(path.to_string_lossy().to_string());
    let err = DatasetLoader::new(source_for(&settings)?)
        .load()
        .await
        .unwrap_err();

    assert!(matches!(err, FinderError::LoadError { .. }));
    assert!(err.user_friendly_message().contains("Failed to read data file"));
    Ok(())
}
