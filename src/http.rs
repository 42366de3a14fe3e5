use std::time::Duration;

use log::warn;
use reqwest::{header, redirect, Client, ClientBuilder};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";
const MAX_REDIRECTS: usize = 10;

pub fn create_http_client(user_agent: &str, timeout: Option<Duration>) -> reqwest::Result<Client> {
  client_builder(user_agent, timeout).build()
}

/// The builder behind [`create_http_client`], for callers that need extra settings.
pub fn client_builder(user_agent: &str, timeout: Option<Duration>) -> ClientBuilder {
  let mut headers = header::HeaderMap::new();
  match header::HeaderValue::from_str(user_agent) {
    Ok(value) => {
      headers.insert(header::USER_AGENT, value);
    }
    Err(_) => warn!("ignoring invalid user agent {:?}", user_agent),
  }

  let mut builder = Client::builder()
    .default_headers(headers)
    .redirect(redirect::Policy::limited(MAX_REDIRECTS));
  if let Some(timeout) = timeout {
    builder = builder.timeout(timeout);
  }
  builder
}
