// fetch a url and stream the body to disk
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{error::DownloadError, filename::sanitize_filename};

pub struct Downloader {
  client: Client,
}

impl Downloader {
  pub fn new(client: Client) -> Self {
    Self { client }
  }

  /// Downloads `url` into `folder` and returns the written path.
  ///
  /// Only a `200 OK` counts as success. The body is written chunk by chunk as
  /// it arrives; an existing file with the same name is overwritten.
  pub async fn download(&self, url: &str, folder: &Path) -> Result<PathBuf, DownloadError> {
    debug!("GET {}", url);
    let mut res = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|source| request_error(url, source))?;

    let status = res.status();
    if status != StatusCode::OK {
      warn!("{} answered {}", url, status);
      return Err(DownloadError::Status {
        url: url.to_string(),
        status,
      });
    }

    let path = folder.join(sanitize_filename(url));
    let write_error = |source: std::io::Error| DownloadError::Write {
      url: url.to_string(),
      path: path.clone(),
      source,
    };

    let mut file = File::create(&path).await.map_err(write_error)?;
    let mut chunks = 0usize;
    let mut written = 0usize;
    while let Some(chunk) = res.chunk().await.map_err(|source| request_error(url, source))? {
      file.write_all(&chunk).await.map_err(write_error)?;
      chunks += 1;
      written += chunk.len();
    }
    file.flush().await.map_err(write_error)?;

    debug!("{} chunks from {}", chunks, url);
    info!("saved {} ({} bytes)", path.display(), written);
    Ok(path)
  }
}

fn request_error(url: &str, source: reqwest::Error) -> DownloadError {
  warn!("request to {} failed: {}", url, source);
  DownloadError::Request {
    url: url.to_string(),
    source,
  }
}
