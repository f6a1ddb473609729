//! Scratch storage for uploaded files.
//!
//! Uploads are stored under a server-generated UUID. The client-supplied filename only contributes
//! its extension, and only when that extension is short and alphanumeric.
use std::{
    io,
    path::{Path, PathBuf},
};

use uuid::Uuid;

pub struct ScratchDir {
    root: PathBuf,
    keep_files: bool,
}

impl ScratchDir {
    /// Open the scratch directory, creating it if absent.
    ///
    /// With `keep_files` unset, every stored upload is removed once its `ScratchFile` is dropped.
    pub fn create(root: impl Into<PathBuf>, keep_files: bool) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;

        Ok(Self { root, keep_files })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub async fn store(&self, client_name: Option<&str>, data: &[u8]) -> io::Result<ScratchFile> {
        let path = self.root.join(scratch_name(client_name));
        tokio::fs::write(&path, data).await?;

        Ok(ScratchFile {
            path,
            keep: self.keep_files,
        })
    }
}

/// Handle to one stored upload.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    keep: bool,
}

impl ScratchFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            log::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

fn scratch_name(client_name: Option<&str>) -> String {
    let id = Uuid::new_v4();
    match client_name.and_then(sanitized_extension) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

fn sanitized_extension(client_name: &str) -> Option<String> {
    let ext = Path::new(client_name).extension()?.to_str()?;
    match ext.len() {
        1..=5 if ext.chars().all(|c| c.is_ascii_alphanumeric()) => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}
