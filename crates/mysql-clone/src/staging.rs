//! The on-disk staging artifact holding the in-flight dump.

use crate::error::{CloneError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directory for in-flight artifacts.
pub const STORAGE_DIR: &str = "./storage";

/// File name of the staging dump.
pub const DUMP_FILE: &str = "dump.tmp";

/// The local dump file exchanged between the export and import stages.
///
/// The file is truncated before export begins and again after import
/// completes, so no partial dump survives across runs. Its byte size is only
/// a progress signal; the contents are opaque to the pipeline.
#[derive(Debug, Clone)]
pub struct StagingArtifact {
    path: PathBuf,
}

impl Default for StagingArtifact {
    fn default() -> Self {
        Self {
            path: Path::new(STORAGE_DIR).join(DUMP_FILE),
        }
    }
}

impl StagingArtifact {
    /// Place the staging artifact at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Verify the storage directory exists and is writable.
    pub async fn ensure_writable(&self) -> Result<()> {
        let dir = self.storage_dir();
        fs::create_dir_all(dir).await?;

        let meta = fs::metadata(dir).await?;
        if meta.permissions().readonly() {
            return Err(CloneError::StorageUnwritable {
                path: dir.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Reset the artifact to zero bytes, creating it if missing.
    pub async fn truncate(&self) -> Result<()> {
        fs::create_dir_all(self.storage_dir()).await?;
        fs::write(&self.path, b"").await?;
        Ok(())
    }

    pub async fn size_bytes(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path).await?.len())
    }

    pub async fn size_megabytes(&self) -> Result<f64> {
        Ok(self.size_bytes().await? as f64 / (1024.0 * 1024.0))
    }
}
