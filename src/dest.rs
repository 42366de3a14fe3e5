// where a batch writes its files
use std::{
  fmt,
  path::{Path, PathBuf},
};

use chrono::NaiveDate;
use log::debug;

use crate::error::BatchError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationMode {
  /// The folder typed by the user.
  Folder,
  /// A `YYYY-MM-DD` subfolder of the folder typed by the user.
  DatedFolder,
  /// The platform Downloads directory.
  Downloads,
  /// A `YYYY-MM-DD` subfolder of the platform Downloads directory.
  DatedDownloads,
}

impl DestinationMode {
  pub fn needs_folder(&self) -> bool {
    matches!(self, DestinationMode::Folder | DestinationMode::DatedFolder)
  }

  fn is_dated(&self) -> bool {
    matches!(self, DestinationMode::DatedFolder | DestinationMode::DatedDownloads)
  }
}

impl fmt::Display for DestinationMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      DestinationMode::Folder => "folder",
      DestinationMode::DatedFolder => "dated-folder",
      DestinationMode::Downloads => "downloads",
      DestinationMode::DatedDownloads => "dated-downloads",
    };
    write!(f, "{}", name)
  }
}

pub fn date_stamp(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

pub fn downloads_dir() -> Option<PathBuf> {
  dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
}

/// Works out the destination folder for one batch without touching the disk.
///
/// `folder` is the raw text from the user and only matters for the folder
/// modes, where blank text is rejected. `downloads` is the platform Downloads
/// directory, if one could be found.
pub fn resolve_destination(
  mode: DestinationMode,
  folder: &str,
  downloads: Option<&Path>,
  today: NaiveDate,
) -> Result<PathBuf, BatchError> {
  let base = if mode.needs_folder() {
    // blank text is rejected, anything else is used exactly as typed
    if folder.trim().is_empty() {
      return Err(BatchError::EmptyDestination);
    }
    PathBuf::from(folder)
  } else {
    downloads.ok_or(BatchError::NoDownloadsDir)?.to_path_buf()
  };

  if mode.is_dated() {
    Ok(base.join(date_stamp(today)))
  } else {
    Ok(base)
  }
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<(), BatchError> {
  if path.is_dir() {
    return Ok(());
  }
  debug!("creating {}", path.display());
  std::fs::create_dir_all(path).map_err(|source| BatchError::CreateDir {
    path: path.to_path_buf(),
    source,
  })
}
