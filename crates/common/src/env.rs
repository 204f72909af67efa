//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of the data file exists.
///
/// `None` means the store runs in memory; that is logged and accepted.
pub async fn ensure_env(data_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(data_file) = data_file else {
        warn!("no storage.data_file configured; people are kept in memory only");
        return Ok(());
    };
    if let Some(dir) = data_file.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    info!(data_file = %data_file.display(), "file-backed people store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("people_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("nested").join("people.json");
        ensure_env(Some(file.as_path())).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_is_accepted() -> anyhow::Result<()> {
        ensure_env(None).await
    }
}
