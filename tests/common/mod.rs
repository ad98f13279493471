//! Minimal blocking HTTP server for exercising the client without the network.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub const GLOBAL_JSON: &str = r#"{
  "updated": 1700000000000,
  "cases": 1000000,
  "deaths": 20000,
  "recovered": 900000,
  "active": 78000,
  "critical": 2000,
  "casesPerOneMillion": 12500,
  "deathsPerOneMillion": 250,
  "tests": 5000000
}"#;

pub const GERMANY_JSON: &str = r#"{
  "country": "Germany",
  "cases": 38437756,
  "deaths": 174979,
  "recovered": 38240600,
  "active": 22177,
  "critical": 0,
  "casesPerOneMillion": 458227.5,
  "deathsPerOneMillion": 2086
}"#;

pub const USA_HISTORY_JSON: &str = r#"{
  "country": "USA",
  "province": ["mainland"],
  "timeline": {
    "cases": {"1/1/24": 100, "1/3/24": 150, "1/2/24": 120},
    "deaths": {"1/1/24": 1, "1/3/24": 3, "1/2/24": 2},
    "recovered": {"1/1/24": 0, "1/3/24": 0, "1/2/24": 0}
  }
}"#;

pub const NOT_FOUND_JSON: &str =
    r#"{"message":"Country not found or doesn't have any cases"}"#;

/// A canned response for an exact request target (path plus query).
pub struct Route {
    pub target: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(target: &'static str, body: &str) -> Self {
        Self {
            target,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(target: &'static str, status: u16, body: &str) -> Self {
        Self {
            target,
            status,
            body: body.to_string(),
        }
    }
}

pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Serve `routes` under `/v3/covid-19`; anything else is a 404.
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                handle(stream, &routes, &seen);
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{port}/v3/covid-19"),
            requests,
        }
    }

    /// Request targets received so far, relative to the base path.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &[Route], seen: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) => break,
            Ok(_) if header == "\r\n" || header == "\n" => break,
            Ok(_) => {}
            Err(_) => return,
        }
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .trim_start_matches("/v3/covid-19")
        .to_string();
    seen.lock().unwrap().push(target.clone());

    let (status, body) = routes
        .iter()
        .find(|r| r.target == target)
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, NOT_FOUND_JSON.to_string()));
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// A base URL on a port nothing listens on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/v3/covid-19")
}

/// The three standard routes used by most tests.
pub fn standard_server() -> MockServer {
    MockServer::start(vec![
        Route::ok("/all", GLOBAL_JSON),
        Route::ok("/countries/germany", GERMANY_JSON),
        Route::ok("/historical/usa?lastdays=30", USA_HISTORY_JSON),
        Route::ok("/historical/usa?lastdays=7", USA_HISTORY_JSON),
    ])
}
