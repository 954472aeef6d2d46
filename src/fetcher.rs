use crate::error::{MangaDlError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Outcome of a page image fetch. A non-success status is not an error: it
/// is the end-of-chapter signal the downloader stops on.
#[derive(Debug)]
pub enum ImageFetch {
    Body(Vec<u8>),
    Ended(StatusCode),
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("manga-dl/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch the chapter page HTML. A non-success status is an error here,
    /// unlike image fetches: without the page there is nothing to extract.
    pub async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(MangaDlError::Http(response.error_for_status().unwrap_err()));
        }

        let text = response.text().await?;
        Ok(text)
    }

    /// Fetch one page image. Returns `Ended` on any non-success status and
    /// errors only on transport failure.
    pub async fn fetch_image(&self, url: &str) -> Result<ImageFetch> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("image fetch ended with status {} at {}", status, url);
            return Ok(ImageFetch::Ended(status));
        }

        let bytes = response.bytes().await?;
        Ok(ImageFetch::Body(bytes.to_vec()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
