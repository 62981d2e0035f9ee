//! Secured Health Records API client with request/response handling.

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::error::error_from_response;
use crate::config::ClientConfig;
use crate::error::{HrError, Result};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, Transport};

/// API client.
///
/// Holds the bearer token once a user has signed in; every call made
/// through [`ApiClient::get`], [`ApiClient::post`], [`ApiClient::put`] and
/// [`ApiClient::delete`] sends it.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    api_base: String,
    token: Option<String>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_base", &self.api_base)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiClient {
    /// Create a client using a `reqwest` transport configured from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = HttpClient::from_config(config)?;
        Ok(Self::with_transport(&config.api_base, Arc::new(http)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(api_base: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Set the bearer token for authenticated requests.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Clear the bearer token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Get the current token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Copy of this client carrying `token`.
    pub fn authorized(&self, token: &str) -> Self {
        let mut client = self.clone();
        client.set_token(token);
        client
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Full URL for an endpoint given as path segments.
    ///
    /// Each segment is percent-encoded on its own, so an id holding `/`,
    /// `?` or `#` stays a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| HrError::Custom(format!("Invalid API base {}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| HrError::Custom(format!("API base cannot take a path: {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// POST `body` without a token and decode whatever comes back.
    ///
    /// The status code is ignored: the caller decides from the decoded
    /// object what happened. A body that is not JSON is an error.
    pub async fn post_unchecked(&self, path: &[&str], body: &Value) -> Result<Value> {
        let req = HttpRequest::new(HttpMethod::Post, self.endpoint(path)?).with_json(body);
        let response = self.dispatch(req).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// GET a JSON resource with query parameters.
    ///
    /// Empty values are kept (`?parentId=`), which the nodes endpoint reads
    /// as the root folder.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let req = self.authorize(HttpRequest::new(HttpMethod::Get, url));
        let response = self.send_checked(req).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post<T: DeserializeOwned>(&self, path: &[&str], body: &Value) -> Result<T> {
        let req = HttpRequest::new(HttpMethod::Post, self.endpoint(path)?).with_json(body);
        let response = self.send_checked(self.authorize(req)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// PUT a JSON body and decode the JSON reply.
    pub async fn put<T: DeserializeOwned>(&self, path: &[&str], body: &Value) -> Result<T> {
        let req = HttpRequest::new(HttpMethod::Put, self.endpoint(path)?).with_json(body);
        let response = self.send_checked(self.authorize(req)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// DELETE a resource; any 2xx is success and the body is ignored.
    pub async fn delete(&self, path: &[&str]) -> Result<()> {
        let req = HttpRequest::new(HttpMethod::Delete, self.endpoint(path)?);
        self.send_checked(self.authorize(req)).await?;
        Ok(())
    }

    fn authorize(&self, req: HttpRequest) -> HttpRequest {
        match &self.token {
            Some(token) => req.with_header("Authorization", &format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn send_checked(&self, req: HttpRequest) -> Result<HttpResponse> {
        let response = self.dispatch(req).await?;
        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        Ok(response)
    }

    async fn dispatch(&self, req: HttpRequest) -> Result<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        debug!("api request {} {}", method, url);

        match self.transport.send(req).await {
            Ok(response) => {
                debug!(
                    "api response {} {} status={} bytes={}",
                    method,
                    url,
                    response.status,
                    response.body.len()
                );
                Ok(response)
            }
            Err(e) => {
                debug!("api request {} {} failed: {}", method, url, e);
                Err(e)
            }
        }
    }
}
