mod http;
mod local;
mod stdin;

pub use http::HttpSource;
pub use local::LocalFileSource;
pub use stdin::StdinSource;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for loading an uploaded spreadsheet into memory
#[async_trait]
pub trait Source: Send + Sync {
    /// Read the whole source, failing if it holds more than `limit` bytes
    async fn read_all(&self, limit: u64) -> Result<Vec<u8>>;

    /// File name the parser is chosen by (empty when unknown)
    fn file_name(&self) -> &str;
}
