//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

/// Create the data directory (and parents) if it is missing.
pub async fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
