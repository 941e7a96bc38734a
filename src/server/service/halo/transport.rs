//! HTTP transport seam for upstream calls.
//!
//! The token chain and data client build `ApiRequest` values and hand them to
//! a `Transport`. Production uses `ReqwestTransport`; tests substitute a fake
//! that records requests and replays canned responses.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// HTTP method for an upstream request. The upstream surface only uses these
/// two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Request body variants the upstream surface needs.
#[derive(Clone, Debug)]
pub enum RequestBody {
    None,
    Json(Value),
    Form(Vec<(&'static str, String)>),
}

/// A fully described upstream request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    pub fn post_form(url: impl Into<String>, fields: Vec<(&'static str, String)>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(fields),
        }
    }

    /// Appends a header, builder style.
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Looks up a header by name. First match wins.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| *header == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Status and parsed JSON body of an upstream response.
///
/// Bodies that are not valid JSON come back as `Value::Null`; callers gate on
/// `status` before reading fields, so an unparseable success body simply fails
/// field extraction.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed mid-flight.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
}

/// Dispatches upstream requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Json(ref value) => builder
                .header("Content-Type", "application/json; charset=utf-8")
                .body(value.to_string()),
            RequestBody::Form(ref fields) => builder.form(fields),
        };

        let response = builder.send().await.map_err(|source| TransportError::Request {
            url: request.url.clone(),
            source,
        })?;

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok(ApiResponse { status, body })
    }
}
