use std::{process, time::Duration};

use clap::Parser;
use image_dl::{
  cli::Args,
  dl::Downloader,
  http::create_http_client,
  prompt::{ask, Answer},
  report::{ConsoleReporter, Reporter},
  AsyncResult, Session, Trigger,
};
use tokio::io::{self, BufReader};

#[macro_use]
extern crate log;

const LINKS_PROMPT: &str = "Paste URLs (comma-separated): ";
const FOLDER_PROMPT: &str = "Enter Folder Path to Save Images: ";
const NOT_UTF8: &str = "Input is not valid UTF-8, please paste it again.";

async fn interactive(session: &mut Session, reporter: &dyn Reporter, folder: Option<&str>) -> AsyncResult<()> {
  let mut input = BufReader::new(io::stdin());
  let mut output = io::stdout();
  reporter.info("Paste your image URLs (comma-separated) below to download them as JPEGs.");

  loop {
    let links = match ask(&mut input, &mut output, LINKS_PROMPT).await? {
      Answer::Line(links) => links,
      Answer::Invalid => {
        reporter.error(NOT_UTF8);
        continue;
      }
      Answer::Eof => break,
    };

    let folder = match folder {
      Some(f) => f.to_string(),
      None if session.mode().needs_folder() => match ask(&mut input, &mut output, FOLDER_PROMPT).await? {
        Answer::Line(f) => f,
        Answer::Invalid => {
          reporter.error(NOT_UTF8);
          continue;
        }
        Answer::Eof => break,
      },
      None => String::new(),
    };

    let trigger = Trigger { links, folder };
    if let Err(e) = session.submit(reporter, &trigger).await {
      debug!("batch aborted: {:?}", e);
    }
  }

  Ok(())
}

#[tokio::main]
async fn main() -> AsyncResult<()> {
  let args = Args::parse();
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter())).init();

  let client = create_http_client(&args.user_agent, args.timeout.map(Duration::from_secs))?;
  let mut session = Session::new(Downloader::new(client), args.mode()).with_max_concurrent(args.max_concurrent);
  let reporter = ConsoleReporter;
  info!("destination mode: {}", session.mode());

  let Some(links) = args.links.clone() else {
    return interactive(&mut session, &reporter, args.folder.as_deref()).await;
  };

  let trigger = Trigger {
    links,
    folder: args.folder.clone().unwrap_or_default(),
  };
  match session.submit(&reporter, &trigger).await {
    Ok(report) if report.success_count() > 0 => Ok(()),
    _ => process::exit(1),
  }
}
