use async_trait::async_trait;
use log::warn;
use reqwest::{Client, Url};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::Source;
use anyhow::{Result, bail};

/// Spreadsheet downloaded over HTTP(S)
pub struct HttpSource {
    client: Client,
    url: Url,
    file_name: String,
    transferred_bytes: AtomicU64,
    max_retry: u32,
}

impl HttpSource {
    /// Create a new HTTP source
    ///
    /// The file name is the last segment of the URL path.
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let url = Url::parse(url)?;
        let file_name = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            client,
            url,
            file_name,
            transferred_bytes: AtomicU64::new(0),
            max_retry: 10,
        })
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn read_all(&self, limit: u64) -> Result<Vec<u8>> {
        let mut retry_count = 0;

        loop {
            let result = self.client.get(self.url.clone()).send().await;

            match result {
                Ok(resp) => {
                    if !resp.status().is_success() {
                        bail!("HTTP request failed with status: {}", resp.status());
                    }
                    if let Some(len) = resp.content_length().filter(|&len| len > limit) {
                        bail!("remote file is {} bytes, larger than the {} byte limit", len, limit);
                    }

                    let bytes = resp.bytes().await?;
                    self.transferred_bytes
                        .fetch_add(bytes.len() as u64, Ordering::Relaxed);
                    if bytes.len() as u64 > limit {
                        bail!("remote file is larger than the {} byte limit", limit);
                    }
                    return Ok(bytes.to_vec());
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded");
                    }
                    warn!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.max_retry, e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }
}
