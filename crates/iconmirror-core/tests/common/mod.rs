#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use iconmirror_fetch::{FetchOptions, Fetcher, HttpClient, HttpResponse};

pub const PNG_A: &[u8] = b"\x89PNG\r\n\x1a\n-image-a";
pub const PNG_B: &[u8] = b"\x89PNG\r\n\x1a\n-image-b";
pub const SVG_C: &[u8] = b"<?xml version=\"1.0\"?><svg xmlns=\"http://www.w3.org/2000/svg\"/>";

#[derive(Debug)]
pub struct Unreachable(pub String);

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "unreachable host for {}", self.0) }
}

impl std::error::Error for Unreachable {}

/// Serves fixed responses from memory. Unknown URLs fail like a dead host.
#[derive(Default)]
pub struct MemoryClient {
    routes:   Mutex<HashMap<String, HttpResponse>>,
    delays:   Mutex<HashMap<String, Duration>>,
    requests: AtomicUsize,
}

impl MemoryClient {
    pub fn route(self, url: &str, body: impl AsRef<[u8]>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), HttpResponse::ok(body.as_ref().to_vec()));
        self
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), HttpResponse::status(status));
        self
    }

    pub fn delay(self, url: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
        self
    }

    pub fn requests(&self) -> usize { self.requests.load(Ordering::SeqCst) }
}

impl HttpClient for MemoryClient {
    type Error = Unreachable;

    async fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let response = self.routes.lock().unwrap().get(url).cloned();
        response.ok_or_else(|| Unreachable(url.to_string()))
    }
}

pub fn fetcher(client: MemoryClient) -> Fetcher<MemoryClient> {
    Fetcher::new(client).with_options(FetchOptions::default().max_retries(0).retry_backoff(Duration::ZERO))
}

pub fn manifest(icons: &[(&str, &str)]) -> String {
    let icons: Vec<serde_json::Value> = icons
        .iter()
        .map(|(name, url)| serde_json::json!({ "name": name, "url": url }))
        .collect();
    serde_json::json!({ "name": "upstream", "description": "upstream set", "icons": icons }).to_string()
}
