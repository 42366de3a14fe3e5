//! Tiny HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of path -> (status, body) and answers 404 for
//! anything else. Counts every connection it accepts and keeps the
//! User-Agent header of every request.

use std::{
  collections::HashMap,
  io::{Read, Write},
  net::{TcpListener, TcpStream},
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
  thread,
  time::Duration,
};

pub struct Route {
  pub status: u16,
  pub body: Vec<u8>,
  /// Answer with a redirect to this path instead of the body.
  pub location: Option<String>,
}

impl Route {
  pub fn ok(body: &[u8]) -> Self {
    Self {
      status: 200,
      body: body.to_vec(),
      location: None,
    }
  }

  pub fn status(status: u16) -> Self {
    Self {
      status,
      body: Vec::new(),
      location: None,
    }
  }

  pub fn redirect(to: &str) -> Self {
    Self {
      status: 302,
      body: Vec::new(),
      location: Some(to.to_string()),
    }
  }
}

pub struct TestServer {
  pub base: String,
  hits: Arc<AtomicUsize>,
  agents: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
  pub fn url(&self, path: &str) -> String {
    format!("{}{}", self.base, path)
  }

  pub fn hits(&self) -> usize {
    self.hits.load(Ordering::SeqCst)
  }

  pub fn user_agents(&self) -> Vec<String> {
    self.agents.lock().unwrap().clone()
  }
}

/// Starts the server on a random port. It runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> TestServer {
  let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
  let port = listener.local_addr().unwrap().port();
  let routes: Arc<HashMap<String, Route>> = Arc::new(
    routes
      .into_iter()
      .map(|(path, route)| (path.to_string(), route))
      .collect(),
  );
  let hits = Arc::new(AtomicUsize::new(0));
  let agents = Arc::new(Mutex::new(Vec::new()));
  let counter = Arc::clone(&hits);
  let seen = Arc::clone(&agents);
  thread::spawn(move || {
    for stream in listener.incoming().flatten() {
      let routes = Arc::clone(&routes);
      let seen = Arc::clone(&seen);
      counter.fetch_add(1, Ordering::SeqCst);
      thread::spawn(move || handle(stream, &routes, &seen));
    }
  });
  TestServer {
    base: format!("http://127.0.0.1:{}", port),
    hits,
    agents,
  }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, agents: &Mutex<Vec<String>>) {
  let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
  let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
  let mut buf = [0u8; 8192];
  let n = match stream.read(&mut buf) {
    Ok(0) | Err(_) => return,
    Ok(n) => n,
  };
  let request = String::from_utf8_lossy(&buf[..n]);
  let path = request
    .lines()
    .next()
    .and_then(|line| line.split_whitespace().nth(1))
    .unwrap_or("/")
    .to_string();
  if let Some(agent) = request.lines().find_map(|line| {
    let (name, value) = line.split_once(':')?;
    name.eq_ignore_ascii_case("user-agent").then(|| value.trim().to_string())
  }) {
    agents.lock().unwrap().push(agent);
  }

  let (status, body, location) = match routes.get(&path) {
    Some(route) => (route.status, route.body.as_slice(), route.location.as_deref()),
    None => (404, &b""[..], None),
  };
  let location = location
    .map(|to| format!("Location: {}\r\n", to))
    .unwrap_or_default();
  let head = format!(
    "HTTP/1.1 {} X\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
    status,
    body.len(),
    location
  );
  let _ = stream.write_all(head.as_bytes());
  let _ = stream.write_all(body);
  let _ = stream.flush();
}
