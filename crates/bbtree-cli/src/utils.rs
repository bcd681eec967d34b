use anyhow::{Context, Result};
use tokio::fs;

/// Read the whole markup file.
///
/// # Errors
///
/// When the file is missing or not valid utf-8.
pub async fn read_content(path: &str) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("when reading content file {path:?}"))
}
