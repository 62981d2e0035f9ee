//! HTTP transport for Secured Health Records API requests.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ClientConfig;
use crate::error::{HrError, Result};

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single outgoing request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body and the matching content type.
    pub fn with_json(self, body: &serde_json::Value) -> Self {
        let mut req = self.with_header("Content-Type", "application/json");
        req.body = Some(body.to_string());
        req
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can carry an [`HttpRequest`] to the server.
///
/// Implementations return every response that arrives, whatever its status;
/// only failures to get a response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with the timeout and proxy from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(url)
                .map_err(|e| HrError::Custom(format!("Proxy {url} rejected: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| HrError::Custom(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(req.method.into(), &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = ClientConfig::new("http://h")
            .with_timeout(Duration::from_secs(5))
            .with_proxy("http://127.0.0.1:8080");
        assert!(HttpClient::from_config(&config).is_ok());
        assert!(HttpClient::from_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_malformed_proxy_is_rejected() {
        let config = ClientConfig::new("http://h").with_proxy("http://[::1");
        assert!(matches!(
            HttpClient::from_config(&config),
            Err(HrError::Custom(_))
        ));
    }

    #[test]
    fn test_request_builder() {
        let req = HttpRequest::new(HttpMethod::Post, "http://h/api")
            .with_header("Authorization", "Bearer t")
            .with_json(&serde_json::json!({"a": 1}));
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_success_range() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let bad = HttpResponse { status: 401, body: String::new() };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }
}
