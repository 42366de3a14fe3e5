use std::sync::Mutex;

use log::{error, info};

/// The three message channels of the front end.
pub trait Reporter {
  fn info(&self, message: &str);
  fn success(&self, message: &str);
  fn error(&self, message: &str);
}

/// Prints to the terminal and mirrors every message into the log.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
  fn info(&self, message: &str) {
    info!("{}", message);
    println!("{}", message);
  }

  fn success(&self, message: &str) {
    info!("{}", message);
    println!("{}", message);
  }

  fn error(&self, message: &str) {
    error!("{}", message);
    eprintln!("{}", message);
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
  Info,
  Success,
  Error,
}

/// Keeps every message in order. Handy for embedding and tests.
#[derive(Default)]
pub struct MemoryReporter {
  messages: Mutex<Vec<(Channel, String)>>,
}

impl MemoryReporter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn messages(&self) -> Vec<(Channel, String)> {
    match self.messages.lock() {
      Ok(messages) => messages.clone(),
      Err(poisoned) => poisoned.into_inner().clone(),
    }
  }

  pub fn on(&self, channel: Channel) -> Vec<String> {
    self
      .messages()
      .into_iter()
      .filter(|(c, _)| *c == channel)
      .map(|(_, m)| m)
      .collect()
  }

  fn push(&self, channel: Channel, message: &str) {
    let mut messages = match self.messages.lock() {
      Ok(messages) => messages,
      Err(poisoned) => poisoned.into_inner(),
    };
    messages.push((channel, message.to_string()));
  }
}

impl Reporter for MemoryReporter {
  fn info(&self, message: &str) {
    self.push(Channel::Info, message);
  }

  fn success(&self, message: &str) {
    self.push(Channel::Success, message);
  }

  fn error(&self, message: &str) {
    self.push(Channel::Error, message);
  }
}
