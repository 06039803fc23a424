//! HTTP transport boundary.
//!
//! Calls build a [`Request`] as plain data and hand it to a [`Transport`],
//! which returns the status code and raw body. [`HttpTransport`] is the
//! `reqwest` implementation; tests plug in fakes.

use std::fmt;
use std::future::Future;

use url::Url;

use crate::{config::ClientConfig, Credentials, Error};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// An outgoing request described as plain data.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Full URL including the query string.
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub credentials: Credentials,
    pub body: Option<String>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status code and undecoded body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the response without interpreting it.
///
/// Implementations report connection-level failures only; non-success
/// statuses are returned as ordinary responses.
pub trait Transport {
    fn send(&self, request: Request) -> impl Future<Output = Result<RawResponse, Error>> + Send;
}

/// `reqwest`-backed transport. Credentials are sent as HTTP basic auth.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Transport(e)
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<RawResponse, Error> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url)
            .basic_auth(
                request.credentials.api_key(),
                Some(request.credentials.api_secret()),
            );
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::Transport(e)
        })?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::Transport(e)
        })?;
        Ok(RawResponse { status, body })
    }
}
