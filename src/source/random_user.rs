//! randomuser.me client
//!
//! Implements RecordSource over `GET {base}?page=N&results=N&seed=S`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::{PageRequest, User};
use crate::error::{FeedError, Result};
use crate::source::RecordSource;

/// Public endpoint serving generated users
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/api/";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the randomuser.me client
#[derive(Debug, Clone)]
pub struct RandomUserConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RandomUserConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RandomUserConfig {
    /// Point the client at another base URL (a local mirror, a test server)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// HTTP client for randomuser.me
pub struct RandomUserClient {
    client: Client,
    config: RandomUserConfig,
}

impl RandomUserClient {
    /// Create a new client
    pub fn new(config: RandomUserConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build the GET request for a page without sending it
    fn build_request(&self, request: &PageRequest) -> Result<reqwest::Request> {
        let built = self
            .client
            .get(&self.config.base_url)
            .query(&request.query())
            .build()?;
        Ok(built)
    }

    /// Pull the `results` array out of a response body
    fn parse_response(&self, body: Value) -> Result<Vec<User>> {
        // randomuser.me reports some failures as 200 with an `error` field
        if let Some(message) = body.get("error").and_then(|e| e.as_str()) {
            return Err(FeedError::Source(message.to_string()));
        }

        match body.get("results") {
            Some(results) => Ok(serde_json::from_value(results.clone())?),
            None => Err(FeedError::Source("response has no results field".to_string())),
        }
    }

    /// Send a request and decode the JSON body
    async fn send_request(&self, request: reqwest::Request) -> Result<Value> {
        let response = self.client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RecordSource for RandomUserClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<User>> {
        let http_request = self.build_request(request)?;
        log::debug!("GET {}", http_request.url());
        let body = self.send_request(http_request).await?;
        self.parse_response(body)
    }

    fn name(&self) -> &str {
        "randomuser.me"
    }
}

impl std::fmt::Debug for RandomUserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomUserClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> RandomUserClient {
        RandomUserClient::new(RandomUserConfig::default()).unwrap()
    }

    /// Serve one canned HTTP response on a local port; returns the base URL
    async fn serve_once(status_line: &'static str, body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{}/api/", addr)
    }

    fn local_client(base_url: String) -> RandomUserClient {
        RandomUserClient {
            client: Client::builder().no_proxy().build().unwrap(),
            config: RandomUserConfig::with_base_url(base_url),
        }
    }

    #[test]
    fn test_config_default() {
        let config = RandomUserConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_with_base_url() {
        let config = RandomUserConfig::with_base_url("http://localhost:8080/api/");
        assert_eq!(config.base_url, "http://localhost:8080/api/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_build_request_query() {
        let request = client().build_request(&PageRequest::new(4)).unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://randomuser.me/api/?page=4&results=25&seed=test"
        );
    }

    #[test]
    fn test_build_request_custom_seed() {
        let req = PageRequest::new(1).with_results(10).with_seed("demo");
        let request = client().build_request(&req).unwrap();
        assert_eq!(request.url().query(), Some("page=1&results=10&seed=demo"));
    }

    #[test]
    fn test_parse_response_results() {
        let body = json!({
            "results": [
                { "name": { "first": "Ann", "last": "Lee" }, "email": "ann@example.com" },
                { "name": { "first": "Bo", "last": "Kim" }, "email": "bo@example.com" }
            ],
            "info": { "seed": "test", "results": 2, "page": 1, "version": "1.4" }
        });

        let users = client().parse_response(body).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].display_name(), "Ann Lee");
        assert_eq!(users[1].email, "bo@example.com");
    }

    #[test]
    fn test_parse_response_error_field() {
        let body = json!({ "error": "Uh oh, something has gone wrong." });
        let err = client().parse_response(body).unwrap_err();
        assert!(matches!(err, FeedError::Source(_)));
        assert!(err.to_string().contains("gone wrong"));
    }

    #[test]
    fn test_parse_response_missing_results() {
        let err = client().parse_response(json!({ "info": {} })).unwrap_err();
        assert!(err.to_string().contains("no results"));
    }

    #[test]
    fn test_debug_impl() {
        let debug_str = format!("{:?}", client());
        assert!(debug_str.contains("RandomUserClient"));
        assert!(debug_str.contains("randomuser.me"));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomUserClient>();
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_status() {
        let base = serve_once("503 Service Unavailable", "down".to_string()).await;
        let err = local_client(base).fetch_page(&PageRequest::new(1)).await.unwrap_err();

        match err {
            FeedError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_decodes_live_body() {
        let body = json!({
            "results": [
                { "name": { "first": "Ann", "last": "Lee" }, "email": "ann@example.com" }
            ],
            "info": { "seed": "test", "results": 1, "page": 2, "version": "1.4" }
        });
        let base = serve_once("200 OK", body.to_string()).await;

        let users = local_client(base)
            .fetch_page(&PageRequest::new(2).with_results(1))
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].display_name(), "Ann Lee");
    }
}
