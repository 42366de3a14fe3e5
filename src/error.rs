use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that abort a whole batch before any download starts.
#[derive(Debug, Error)]
pub enum BatchError {
  #[error("Please provide at least one URL.")]
  EmptyInput,

  #[error("Please provide a valid folder path.")]
  EmptyDestination,

  #[error("Unable to create directory: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Unable to locate the Downloads directory.")]
  NoDownloadsDir,

  #[error("No valid links provided!")]
  NoValidLinks,
}

/// Failure of a single URL. The batch carries on with the next one.
#[derive(Debug, Error)]
pub enum DownloadError {
  #[error("Failed to download {url}: HTTP {}", .status.as_u16())]
  Status { url: String, status: StatusCode },

  #[error("Error downloading {url}: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("Error downloading {url}: {source}")]
  Write {
    url: String,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl DownloadError {
  pub fn url(&self) -> &str {
    match self {
      DownloadError::Status { url, .. }
      | DownloadError::Request { url, .. }
      | DownloadError::Write { url, .. } => url,
    }
  }
}
