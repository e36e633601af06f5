/// Trait for fetching raw documents, abstracting over the real HTTP client and
/// test doubles
use crate::error::{NhlError, NhlResult};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, IF_MODIFIED_SINCE, LAST_MODIFIED, USER_AGENT};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, error};

/// Outcome of a GET that may carry an `If-Modified-Since` precondition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx with a body
    Fresh {
        body: Vec<u8>,
        last_modified: Option<String>,
    },
    /// 304, the precondition held
    NotModified,
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// GET `url`, sending `If-Modified-Since` when a token is given.
    /// Statuses other than 2xx and 304 are `NhlError::Fetch`.
    async fn get(&self, url: &str, if_modified_since: Option<&str>) -> NhlResult<FetchOutcome>;
}

/// `DataProvider` backed by reqwest
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

fn client_builder(timeout: Duration) -> reqwest::ClientBuilder {
    reqwest::Client::builder().timeout(timeout)
}

impl HttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> NhlResult<Self> {
        Self::from_builder(client_builder(timeout), user_agent)
    }

    fn from_builder(builder: reqwest::ClientBuilder, user_agent: &str) -> NhlResult<Self> {
        let client = builder.build().map_err(|e| NhlError::fetch("<client>", e))?;
        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait]
impl DataProvider for HttpClient {
    async fn get(&self, url: &str, if_modified_since: Option<&str>) -> NhlResult<FetchOutcome> {
        let mut request = self.client.get(url).header(USER_AGENT, &self.user_agent);
        if let Some(since) = if_modified_since {
            debug!("{} - If-Modified-Since: {}", url, since);
            request = request.header(IF_MODIFIED_SINCE, since);
        }

        let response = request.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            };
            NhlError::fetch(url, reason)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            return Ok(FetchOutcome::NotModified);
        }
        if !status.is_success() {
            error!("HTTP Error ({}): {}", url, status.as_u16());
            return Err(NhlError::fetch(url, format!("HTTP {}", status.as_u16())));
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|value: &HeaderValue| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| NhlError::fetch(url, e))?
            .to_vec();

        Ok(FetchOutcome::Fresh {
            body,
            last_modified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const TEST_AGENT: &str = "nhl-bot-test/1.0";
    const LAST_MODIFIED_VALUE: &str = "Sun, 23 Apr 2017 23:00:00 GMT";

    /// Client for loopback tests; bypasses any proxy from the environment
    fn client(timeout: Duration) -> HttpClient {
        HttpClient::from_builder(client_builder(timeout).no_proxy(), TEST_AGENT).unwrap()
    }

    /// Serve one connection with `response` (or never answer when `None`),
    /// handing back the raw request head, lowercased
    async fn serve_once(response: Option<&'static str>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/schedule", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            match response {
                Some(response) => stream.write_all(response.as_bytes()).await.unwrap(),
                None => tokio::time::sleep(Duration::from_secs(5)).await,
            }
            String::from_utf8_lossy(&head).to_lowercase()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn test_fresh_response_with_last_modified() {
        let (url, server) = serve_once(Some(
            "HTTP/1.1 200 OK\r\n\
             Last-Modified: Sun, 23 Apr 2017 23:00:00 GMT\r\n\
             Content-Length: 16\r\n\
             Connection: close\r\n\r\n\
             {\"totalGames\":0}",
        ))
        .await;

        let outcome = client(Duration::from_secs(5)).get(&url, None).await.unwrap();

        assert_eq!(
            outcome,
            FetchOutcome::Fresh {
                body: b"{\"totalGames\":0}".to_vec(),
                last_modified: Some(LAST_MODIFIED_VALUE.to_string()),
            }
        );
        let request = server.await.unwrap();
        assert!(request.contains(&format!("user-agent: {}", TEST_AGENT)), "{}", request);
        assert!(!request.contains("if-modified-since"), "{}", request);
    }

    #[tokio::test]
    async fn test_conditional_request_not_modified() {
        let (url, server) = serve_once(Some(
            "HTTP/1.1 304 Not Modified\r\nConnection: close\r\n\r\n",
        ))
        .await;

        let outcome = client(Duration::from_secs(5))
            .get(&url, Some(LAST_MODIFIED_VALUE))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::NotModified);
        let request = server.await.unwrap();
        let expected = format!("if-modified-since: {}", LAST_MODIFIED_VALUE.to_lowercase());
        assert!(request.contains(&expected), "{}", request);
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_error() {
        let (url, _server) = serve_once(Some(
            "HTTP/1.1 503 Service Unavailable\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\r\n",
        ))
        .await;

        let err = client(Duration::from_secs(5)).get(&url, None).await.unwrap_err();

        assert_eq!(err, NhlError::fetch(&url, "HTTP 503"));
    }

    #[tokio::test]
    async fn test_timeout_is_fetch_error() {
        let (url, _server) = serve_once(None).await;

        let err = client(Duration::from_millis(200)).get(&url, None).await.unwrap_err();

        assert_eq!(err, NhlError::fetch(&url, "request timed out"));
    }
}
