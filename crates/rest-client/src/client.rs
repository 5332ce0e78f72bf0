//! REST transport backed by reqwest.

use crate::error::RestError;
use crate::transport::{HttpTransport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client bound to a single base URL.
///
/// Connection pooling, timeouts and TLS are left to `reqwest`.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// Trailing slashes are stripped. `HmacHttpClient::new` passes an address
    /// that `ClientConfig` has already normalized, so this is a no-op there.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://api.example.com")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path, inserting a single `/` separator.
    fn build_url(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl HttpTransport for RestClient {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, RestError> {
        let url = self.build_url(&request.path);
        tracing::debug!(method = %request.method, url = %url, "HTTP request");

        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            url = %url,
            status = status.as_u16(),
            body_len = body.len(),
            "HTTP response"
        );

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::{Method, StatusCode};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one request with a canned response and return the raw request head.
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        });

        (base_url, handle)
    }

    #[test]
    fn test_build_url_absolute_path() {
        let client = RestClient::with_default_timeout("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("/api/widgets/1"),
            "https://api.example.com/api/widgets/1"
        );
    }

    #[test]
    fn test_build_url_relative_path() {
        let client = RestClient::with_default_timeout("https://api.example.com").unwrap();
        assert_eq!(
            client.build_url("api/widgets"),
            "https://api.example.com/api/widgets"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        let client = RestClient::with_default_timeout("https://host:1234/").unwrap();
        assert_eq!(client.base_url(), "https://host:1234");
        assert_eq!(
            client.build_url("/api/widgets"),
            "https://host:1234/api/widgets"
        );
    }

    #[test]
    fn test_build_url_empty_path() {
        let client = RestClient::with_default_timeout("https://api.example.com").unwrap();
        assert_eq!(client.build_url(""), "https://api.example.com");
    }

    #[tokio::test]
    async fn test_send_returns_status_and_body() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
        )
        .await;
        let client = RestClient::with_default_timeout(&base_url).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("Timestamp", HeaderValue::from_static("2024-03-01T12:00:00.0000000Z"));
        let response = client
            .send(TransportRequest::new(Method::GET, "/api/widgets/7", headers))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body_text(), "not found");

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /api/widgets/7 http/1.1"));
        assert!(head.contains("timestamp: 2024-03-01t12:00:00.0000000z"));
    }

    #[tokio::test]
    async fn test_send_empty_body() {
        let (base_url, server) =
            serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n").await;
        let client = RestClient::with_default_timeout(&base_url).unwrap();

        let response = client
            .send(TransportRequest::new(Method::DELETE, "/api/widgets/7", HeaderMap::new()))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = RestClient::with_default_timeout(&base_url).unwrap();
        let err = client
            .send(TransportRequest::new(Method::GET, "/", HeaderMap::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::Connection(_)));
    }
}
