//! Outbound request transport.
//!
//! Client code sends every request through a [`Transport`], which lets the
//! interceptor sit in front of the real network without replacing anything
//! global.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("response is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A request as client code describes it. `url` may be relative.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            method: Method::POST,
            url: url.into(),
            headers,
            body: Some(body.to_string().into_bytes()),
        }
    }
}

/// What came back.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ClientResponse {
    pub fn json(&self) -> Result<Value, TransportError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<ClientResponse, TransportError>;
}

/// Sends requests with `reqwest`, resolving relative URLs against `base`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestTransport {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    /// Absolute URL for `url`; absolute inputs are returned as-is.
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base.join(url).map_err(|source| TransportError::InvalidUrl {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<ClientResponse, TransportError> {
        let url = self.resolve(&request.url)?;
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok(ClientResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_urls_resolve_against_base() {
        let transport =
            ReqwestTransport::new(Url::parse("http://localhost:3000").unwrap(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            transport.resolve("/api/generate-activities").unwrap().as_str(),
            "http://localhost:3000/api/generate-activities"
        );
        assert_eq!(
            transport.resolve("http://other:9000/api/health").unwrap().as_str(),
            "http://other:9000/api/health"
        );
    }

    #[test]
    fn post_json_sets_content_type() {
        let request = OutboundRequest::post_json("/api/x", &serde_json::json!({"a": 1}));
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
        assert_eq!(request.body.as_deref(), Some(&b"{\"a\":1}"[..]));
    }
}
