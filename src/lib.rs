use std::error::Error;

pub mod cli;
pub mod dest;
pub mod dl;
pub mod error;
pub mod filename;
pub mod http;
pub mod link;
pub mod prompt;
pub mod report;
pub mod run;

pub use error::{BatchError, DownloadError};
pub use run::{run_batch, BatchOptions, BatchReport, Session, State, Trigger};

pub type AsyncResult<T> = Result<T, Box<dyn Error>>;
