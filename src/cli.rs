use clap::{builder::RangedU64ValueParser, ArgAction, Parser, ValueEnum};

use crate::{dest::DestinationMode, http, run::DEFAULT_MAX_CONCURRENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DestArg {
  /// The folder given with --folder or typed at the prompt
  Folder,
  /// A YYYY-MM-DD subfolder of that folder
  DatedFolder,
  /// The system Downloads directory
  Downloads,
  /// A YYYY-MM-DD subfolder of the Downloads directory
  DatedDownloads,
}

impl From<DestArg> for DestinationMode {
  fn from(arg: DestArg) -> Self {
    match arg {
      DestArg::Folder => DestinationMode::Folder,
      DestArg::DatedFolder => DestinationMode::DatedFolder,
      DestArg::Downloads => DestinationMode::Downloads,
      DestArg::DatedDownloads => DestinationMode::DatedDownloads,
    }
  }
}

/// Download images from a comma separated list of URLs, saving each one as .jpeg
#[derive(Debug, Parser)]
#[command(name = "image-dl", version)]
pub struct Args {
  /// Comma separated URLs. Prompts for input repeatedly when omitted
  pub links: Option<String>,

  /// Where downloaded files go
  #[arg(long, value_enum, default_value_t = DestArg::Folder)]
  pub dest: DestArg,

  /// Folder path for the folder modes
  #[arg(short, long)]
  pub folder: Option<String>,

  /// Number of downloads in flight
  #[arg(short = 'c', long, default_value_t = DEFAULT_MAX_CONCURRENT, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
  pub max_concurrent: usize,

  /// Request timeout in seconds
  #[arg(long)]
  pub timeout: Option<u64>,

  /// User-Agent header sent with every request
  #[arg(long, default_value = http::USER_AGENT)]
  pub user_agent: String,

  /// More log output (-v info, -vv debug)
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,
}

impl Args {
  pub fn mode(&self) -> DestinationMode {
    self.dest.into()
  }

  pub fn log_filter(&self) -> &'static str {
    match self.verbose {
      0 => "warn",
      1 => "info",
      _ => "debug",
    }
  }
}
