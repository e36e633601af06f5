/// Mock data provider for development and testing
use crate::data_provider::{DataProvider, FetchOutcome};
use crate::error::{NhlError, NhlResult};
use crate::fixtures;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
struct MockDocument {
    body: Vec<u8>,
    last_modified: Option<String>,
    status: u16,
}

/// Serves scripted documents instead of making real requests.
///
/// Documents are looked up by exact URL first, then by the first registered
/// route whose pattern occurs in the URL. A request whose `If-Modified-Since`
/// equals the document's `Last-Modified` gets a 304.
#[derive(Default)]
pub struct MockProvider {
    documents: Mutex<HashMap<String, MockDocument>>,
    routes: Mutex<Vec<(String, MockDocument)>>,
    requests: Mutex<Vec<(String, Option<String>)>>,
    served: Mutex<HashMap<String, Vec<Vec<u8>>>>,
    calls: AtomicUsize,
    downloads: AtomicUsize,
    latency: Option<Duration>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that answers every stats endpoint with the fixture documents
    pub fn with_fixtures() -> Self {
        info!("Creating MockProvider for development mode");
        let provider = Self::new();
        provider.route_json("/schedule?", &fixtures::schedule_json());
        provider.route_json("/feed/live", &fixtures::game_feed_json());
        provider.route_json("/tournaments/playoffs", &fixtures::playoffs_json());
        provider.route("/htmlreports/", fixtures::game_report_html().as_bytes().to_vec());
        provider
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Register or replace the document for an exact URL
    pub fn insert(&self, url: &str, body: Vec<u8>, last_modified: Option<&str>) {
        let document = MockDocument {
            body,
            last_modified: last_modified.map(str::to_string),
            status: 200,
        };
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), document);
    }

    pub fn insert_json(&self, url: &str, value: &Value, last_modified: Option<&str>) {
        self.insert(url, value.to_string().into_bytes(), last_modified);
    }

    /// Answer any URL containing `pattern`
    pub fn route(&self, pattern: &str, body: Vec<u8>) {
        let document = MockDocument {
            body,
            last_modified: None,
            status: 200,
        };
        self.routes
            .lock()
            .unwrap()
            .push((pattern.to_string(), document));
    }

    pub fn route_json(&self, pattern: &str, value: &Value) {
        self.route(pattern, value.to_string().into_bytes());
    }

    /// Make an exact URL answer with an error status
    pub fn set_status(&self, url: &str, status: u16) {
        let mut documents = self.documents.lock().unwrap();
        let document = documents.entry(url.to_string()).or_insert(MockDocument {
            body: Vec::new(),
            last_modified: None,
            status,
        });
        document.status = status;
    }

    /// Number of requests received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of requests answered with a full body
    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    /// Every request as `(url, If-Modified-Since)`, in arrival order
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().unwrap().clone()
    }

    /// Bodies served with a 200 for `url`
    pub fn served(&self, url: &str) -> Vec<Vec<u8>> {
        self.served
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default()
    }

    fn lookup(&self, url: &str) -> Option<MockDocument> {
        if let Some(document) = self.documents.lock().unwrap().get(url) {
            return Some(document.clone());
        }
        self.routes
            .lock()
            .unwrap()
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, document)| document.clone())
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn get(&self, url: &str, if_modified_since: Option<&str>) -> NhlResult<FetchOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), if_modified_since.map(str::to_string)));

        let document = self.lookup(url);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let document = document.ok_or_else(|| NhlError::fetch(url, "HTTP 404"))?;
        if !(200..300).contains(&document.status) {
            return Err(NhlError::fetch(url, format!("HTTP {}", document.status)));
        }

        if let (Some(since), Some(last_modified)) =
            (if_modified_since, document.last_modified.as_deref())
        {
            if since == last_modified {
                return Ok(FetchOutcome::NotModified);
            }
        }

        self.downloads.fetch_add(1, Ordering::SeqCst);
        self.served
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push(document.body.clone());
        Ok(FetchOutcome::Fresh {
            body: document.body,
            last_modified: document.last_modified,
        })
    }
}
