use crate::error::{MangaDlError, Result};
use crate::fetcher::HttpClient;
use crate::rulebook::Rulebook;
use crate::urlgen::PageUrls;
use crate::{archiver, downloader, extractor};
use std::path::PathBuf;
use tracing::debug;
use url::Url;

pub struct Options {
    /// Extra attempts per image on transient failures. 0 reproduces the
    /// classic stop-on-first-failure behavior exactly.
    pub retries: u32,
    /// Directory the `.cbt` archive is written to.
    pub output_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            retries: 0,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug)]
pub struct Summary {
    pub manga_name: String,
    pub pages: usize,
    pub archive_path: PathBuf,
}

/// The full linear run: rule lookup, page fetch, metadata extraction, URL
/// generation, sequential download into a scoped temp directory, archive.
/// The temp directory is removed on every exit path when it drops.
pub async fn run(
    page_url: &str,
    rulebook: &Rulebook,
    client: &HttpClient,
    options: &Options,
) -> Result<Summary> {
    let hostname = hostname_of(page_url)?;
    let rule = rulebook
        .lookup(&hostname)
        .ok_or_else(|| MangaDlError::UnsupportedWebsite(hostname.clone()))?;
    debug!("using rules for {}", hostname);

    println!("[manga-dl] downloading webpage");
    let html = client.fetch_page(page_url).await?;

    println!("[manga-dl] finding manga name");
    let manga_name = extractor::extract_name(&html, rule)?;
    debug!("manga name: {}", manga_name);

    println!("[manga-dl] finding images");
    let sample_url = extractor::extract_image_url(&html, rule)?;
    debug!("first image: {}", sample_url);

    let urls = PageUrls::from_sample(&sample_url, rule)?;

    let workdir = tempfile::tempdir()?;
    let pages = downloader::download_all(client, urls, workdir.path(), options.retries).await?;

    let archive_path = options.output_dir.join(format!("{}.cbt", manga_name));
    archiver::archive_dir(workdir.path(), &archive_path)?;
    println!("[manga-dl] created archive");

    Ok(Summary {
        manga_name,
        pages,
        archive_path,
    })
}

pub fn hostname_of(page_url: &str) -> Result<String> {
    let parsed = Url::parse(page_url)?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| MangaDlError::UnsupportedWebsite(page_url.to_string()))
}
