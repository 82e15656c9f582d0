use super::Source;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Spreadsheet stored on the local filesystem
pub struct LocalFileSource {
    path: PathBuf,
    file_name: String,
}

impl LocalFileSource {
    pub fn new(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .with_context(|| format!("{} is not a file path", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
        })
    }
}

#[async_trait]
impl Source for LocalFileSource {
    async fn read_all(&self, limit: u64) -> Result<Vec<u8>> {
        let size = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("cannot open {}", self.path.display()))?
            .len();
        if size > limit {
            bail!(
                "{} is {} bytes, larger than the {} byte limit",
                self.path.display(),
                size,
                limit
            );
        }

        Ok(tokio::fs::read(&self.path).await?)
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }
}
