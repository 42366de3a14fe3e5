// one trigger action: validate, resolve the folder, download every link
use std::{
  collections::{BTreeMap, HashMap},
  path::{Path, PathBuf},
  pin::pin,
};

use chrono::NaiveDate;
use futures::{stream, StreamExt};
use log::{debug, info};

use crate::{
  dest::{self, DestinationMode},
  dl::Downloader,
  error::{BatchError, DownloadError},
  filename::sanitize_filename,
  link,
  report::Reporter,
};

pub const DEFAULT_MAX_CONCURRENT: usize = 1;

/// What the user submitted with one trigger action.
#[derive(Debug, Clone, Default)]
pub struct Trigger {
  pub links: String,
  pub folder: String,
}

pub struct BatchOptions<'a> {
  pub mode: DestinationMode,
  pub downloads: Option<&'a Path>,
  pub today: NaiveDate,
  pub max_concurrent: usize,
}

#[derive(Debug)]
pub struct BatchReport {
  pub folder: PathBuf,
  pub attempted: usize,
  pub saved: Vec<PathBuf>,
  /// Failed links with their error, in input order.
  pub failures: Vec<(String, DownloadError)>,
}

impl BatchReport {
  pub fn success_count(&self) -> usize {
    self.saved.len()
  }
}

/// Runs one batch from start to finish.
///
/// Aborting errors are returned before any network request is made. Per-URL
/// failures are reported and collected into the report in input order, even
/// when several downloads are in flight.
pub async fn run_batch(
  downloader: &Downloader,
  reporter: &dyn Reporter,
  trigger: &Trigger,
  opts: &BatchOptions<'_>,
) -> Result<BatchReport, BatchError> {
  if trigger.links.trim().is_empty() {
    return Err(BatchError::EmptyInput);
  }

  let folder = dest::resolve_destination(opts.mode, &trigger.folder, opts.downloads, opts.today)?;
  dest::ensure_dir(&folder)?;
  reporter.info(&format!("Saving images to folder: `{}`", folder.display()));

  let links = link::parse_links(&trigger.links);
  if links.is_empty() {
    return Err(BatchError::NoValidLinks);
  }
  debug!("{} links to fetch: {:?}", links.len(), links);

  let mut report = BatchReport {
    folder,
    attempted: links.len(),
    saved: Vec::new(),
    failures: Vec::new(),
  };

  // links sharing a file name run one after another in the same task so
  // the last one in input order wins, as in a sequential run
  let folder = report.folder.clone();
  let mut results = pin!(stream::iter(group_by_filename(&links))
    .map(|group| download_group(downloader, group, &folder))
    .buffer_unordered(opts.max_concurrent.max(1)));

  let mut pending = BTreeMap::new();
  let mut next = 0;
  while let Some(done) = results.next().await {
    pending.extend(done);
    while let Some(result) = pending.remove(&next) {
      match result {
        Ok(path) => report.saved.push(path),
        Err(e) => {
          reporter.error(&e.to_string());
          report.failures.push((links[next].clone(), e));
        }
      }
      next += 1;
    }
  }

  let count = report.success_count();
  info!("{} of {} links downloaded", count, report.attempted);
  if count > 0 {
    reporter.success(&format!(
      "Downloaded {} images to the folder: `{}`",
      count,
      report.folder.display()
    ));
  } else {
    reporter.error("No images were downloaded.");
  }

  Ok(report)
}

type Slot<'a> = (usize, &'a str);

// input positions grouped by target file name, groups in first-seen order
fn group_by_filename(links: &[String]) -> Vec<Vec<Slot<'_>>> {
  let mut by_name: HashMap<String, usize> = HashMap::new();
  let mut groups: Vec<Vec<Slot<'_>>> = Vec::new();
  for (index, url) in links.iter().enumerate() {
    let group = *by_name.entry(sanitize_filename(url)).or_insert_with(|| {
      groups.push(Vec::new());
      groups.len() - 1
    });
    groups[group].push((index, url.as_str()));
  }
  groups
}

async fn download_group(
  downloader: &Downloader,
  group: Vec<Slot<'_>>,
  folder: &Path,
) -> Vec<(usize, Result<PathBuf, DownloadError>)> {
  let mut done = Vec::with_capacity(group.len());
  for (index, url) in group {
    done.push((index, downloader.download(url, folder).await));
  }
  done
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Idle,
  Running,
}

/// Holds everything that stays fixed between trigger actions.
pub struct Session {
  downloader: Downloader,
  mode: DestinationMode,
  downloads: Option<PathBuf>,
  max_concurrent: usize,
  state: State,
}

impl Session {
  pub fn new(downloader: Downloader, mode: DestinationMode) -> Self {
    Self {
      downloader,
      mode,
      downloads: dest::downloads_dir(),
      max_concurrent: DEFAULT_MAX_CONCURRENT,
      state: State::Idle,
    }
  }

  pub fn with_downloads_dir(mut self, downloads: Option<PathBuf>) -> Self {
    self.downloads = downloads;
    self
  }

  pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
    self.max_concurrent = max_concurrent.max(1);
    self
  }

  pub fn mode(&self) -> DestinationMode {
    self.mode
  }

  pub fn state(&self) -> State {
    self.state
  }

  /// Handles one trigger action dated today.
  pub async fn submit(
    &mut self,
    reporter: &dyn Reporter,
    trigger: &Trigger,
  ) -> Result<BatchReport, BatchError> {
    let today = chrono::Local::now().date_naive();
    self.submit_on(reporter, trigger, today).await
  }

  /// Like [`Session::submit`] with an explicit date for the dated modes.
  /// Aborting errors go to the error channel; the session is idle again
  /// afterwards whatever happened.
  pub async fn submit_on(
    &mut self,
    reporter: &dyn Reporter,
    trigger: &Trigger,
    today: NaiveDate,
  ) -> Result<BatchReport, BatchError> {
    self.state = State::Running;
    let opts = BatchOptions {
      mode: self.mode,
      downloads: self.downloads.as_deref(),
      today,
      max_concurrent: self.max_concurrent,
    };
    let result = run_batch(&self.downloader, reporter, trigger, &opts).await;
    self.state = State::Idle;

    if let Err(e) = &result {
      reporter.error(&e.to_string());
    }
    result
  }
}
