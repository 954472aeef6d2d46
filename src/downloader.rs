use crate::error::Result;
use crate::fetcher::{HttpClient, ImageFetch};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Consume the URL sequence until the first fetch that does not succeed,
/// writing each image to `dest_dir`.
///
/// On-disk names use their own 1-based counter, zero-padded to three digits,
/// independent of the URL sequence's numbering and step. The first
/// non-success status ends the chapter and is not an error; transport
/// failures propagate.
pub async fn download_all<I>(
    client: &HttpClient,
    urls: I,
    dest_dir: &Path,
    retries: u32,
) -> Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{msg}")
            .expect("static progress template"),
    );

    let mut count = 0usize;
    for url in urls {
        let Some(bytes) = fetch_with_retries(client, &url, retries).await? else {
            break;
        };

        count += 1;
        let filename = format!("{:03}.jpg", count);
        tokio::fs::write(dest_dir.join(&filename), &bytes).await?;
        pb.set_message(format!("[manga-dl] downloaded image {}", count));
    }

    pb.finish_and_clear();
    println!("[manga-dl] finished downloading");
    Ok(count)
}

/// One image fetch, with up to `retries` extra attempts on a server error or
/// a transport failure. A 4xx is never retried; it is the end-of-chapter
/// signal. With `retries == 0` this is a plain single fetch.
async fn fetch_with_retries(
    client: &HttpClient,
    url: &str,
    retries: u32,
) -> Result<Option<Vec<u8>>> {
    let mut delay = Duration::from_millis(500);

    for attempt in 0..=retries {
        let last = attempt == retries;

        match client.fetch_image(url).await {
            Ok(ImageFetch::Body(bytes)) => return Ok(Some(bytes)),
            Ok(ImageFetch::Ended(status)) if status.is_server_error() && !last => {
                debug!("retrying {} after status {}", url, status);
            }
            Ok(ImageFetch::Ended(status)) => {
                debug!("stopping at {} with status {}", url, status);
                return Ok(None);
            }
            Err(err) if !last => {
                debug!("retrying {} after transport error: {}", url, err);
            }
            Err(err) => return Err(err),
        }

        tokio::time::sleep(delay).await;
        delay *= 2;
    }

    unreachable!("retry loop always returns")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stops_at_first_failure_with_contiguous_names() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/img045.jpg")
            .with_body("page-one")
            .create_async()
            .await;
        server
            .mock("GET", "/img047.jpg")
            .with_body("page-two")
            .create_async()
            .await;
        server
            .mock("GET", "/img049.jpg")
            .with_status(404)
            .create_async()
            .await;

        // Source URLs step by two; the written files must not.
        let urls = vec![
            format!("{}/img045.jpg", server.url()),
            format!("{}/img047.jpg", server.url()),
            format!("{}/img049.jpg", server.url()),
            format!("{}/img051.jpg", server.url()),
        ];

        let dir = tempfile::tempdir().unwrap();
        let client = HttpClient::new();
        let count = download_all(&client, urls, dir.path(), 0).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            std::fs::read(dir.path().join("001.jpg")).unwrap(),
            b"page-one"
        );
        assert_eq!(
            std::fs::read(dir.path().join("002.jpg")).unwrap(),
            b"page-two"
        );
        assert!(!dir.path().join("003.jpg").exists());
    }

    #[tokio::test]
    async fn server_error_ends_chapter_without_retries() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/001.jpg")
            .with_status(503)
            .create_async()
            .await;

        let urls = vec![format!("{}/001.jpg", server.url())];
        let dir = tempfile::tempdir().unwrap();
        let client = HttpClient::new();

        let count = download_all(&client, urls, dir.path(), 0).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn not_found_is_never_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/001.jpg")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let urls = vec![format!("{}/001.jpg", server.url())];
        let dir = tempfile::tempdir().unwrap();
        let client = HttpClient::new();

        let count = download_all(&client, urls, dir.path(), 3).await.unwrap();
        assert_eq!(count, 0);
        mock.assert_async().await;
    }
}
