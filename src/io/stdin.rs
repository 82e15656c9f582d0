use super::Source;
use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::io::AsyncReadExt;

/// Spreadsheet piped through standard input
pub struct StdinSource;

#[async_trait]
impl Source for StdinSource {
    async fn read_all(&self, limit: u64) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        // One extra byte tells an input of exactly `limit` bytes from a larger one
        tokio::io::stdin()
            .take(limit.saturating_add(1))
            .read_to_end(&mut buf)
            .await?;
        if buf.len() as u64 > limit {
            bail!("standard input is larger than the {} byte limit", limit);
        }
        Ok(buf)
    }

    fn file_name(&self) -> &str {
        ""
    }
}
