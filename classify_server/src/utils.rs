//! Utility functions
//!
use std::{fs::File, io::Cursor, path::Path};

use anyhow::{bail, Result};
use reqwest::Client;

/// Download a file from a URL to a given filepath.
///
/// The body is fully received before anything touches the disk, then written next to `filepath`
/// and renamed into place, so an interrupted download never leaves a file at `filepath`.
pub async fn download_file(client: &Client, url: &str, filepath: impl AsRef<Path>) -> Result<()> {
    let filepath = filepath.as_ref();
    let resp = client.get(url).send().await?.error_for_status()?;
    let content = resp.bytes().await?;

    if let Some(parent) = filepath.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let partial = filepath.with_extension("part");
    if let Err(e) = write_file(&partial, &content) {
        std::fs::remove_file(&partial).ok();
        return Err(e.into());
    }
    std::fs::rename(&partial, filepath)?;

    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    std::io::copy(&mut Cursor::new(content), &mut file)?;
    file.sync_all()
}

/// Make sure the model artifact exists, fetching it from `url` if it is missing.
pub async fn ensure_model(path: &Path, url: Option<&str>) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    match url {
        Some(url) => {
            log::info!("Downloading model from {} to {}", url, path.display());
            download_file(&Client::new(), url, path).await
        }
        None => bail!(
            "model file {} not found and no download URL given",
            path.display()
        ),
    }
}
