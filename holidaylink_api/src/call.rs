//! Request/response encoding conventions.
//!
//! A [`Call`] decides what goes into the request body and how a successful
//! response is decoded. [`execute`] is the one path every call takes: build
//! the URL, attach credentials, send, map the status, decode.

use url::Url;

use crate::{
    query::Params,
    transport::{Method, RawResponse, Request, Transport},
    xml::XmlNode,
    Credentials, Error,
};

/// Longest response body kept in errors and logs.
const MAX_BODY_SNIPPET: usize = 2000;

pub trait Call {
    type Output;

    /// Adds headers and body to the outgoing request.
    fn prepare(&self, request: &mut Request) -> Result<(), Error>;

    /// Decodes the body of a 2xx response.
    fn decode(&self, response: RawResponse) -> Result<Self::Output, Error>;
}

/// No body, no decoding. Used for deletes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleCall;

impl Call for SimpleCall {
    type Output = RawResponse;

    fn prepare(&self, _request: &mut Request) -> Result<(), Error> {
        Ok(())
    }

    fn decode(&self, response: RawResponse) -> Result<RawResponse, Error> {
        Ok(response)
    }
}

/// JSON request body, JSON response. Used for creates and updates.
#[derive(Debug, Clone)]
pub struct JsonCall {
    body: serde_json::Value,
}

impl JsonCall {
    pub fn new(body: serde_json::Value) -> Self {
        Self { body }
    }
}

impl Call for JsonCall {
    type Output = serde_json::Value;

    fn prepare(&self, request: &mut Request) -> Result<(), Error> {
        let body = serde_json::to_string(&self.body)
            .map_err(|e| Error::InvalidPayload(e.to_string()))?;
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request
            .headers
            .push(("accept".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(())
    }

    /// Empty bodies decode to `Value::Null`.
    fn decode(&self, response: RawResponse) -> Result<serde_json::Value, Error> {
        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| {
            let snippet = truncate_body(&response.body);
            tracing::error!("Failed to parse JSON response: {} | body: {}", e, snippet);
            Error::MalformedResponse(format!("invalid JSON: {}", e))
        })
    }
}

/// No body, XML response. Used for reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCall;

impl Call for XmlCall {
    type Output = XmlNode;

    fn prepare(&self, request: &mut Request) -> Result<(), Error> {
        request
            .headers
            .push(("accept".to_string(), "application/xml".to_string()));
        Ok(())
    }

    fn decode(&self, response: RawResponse) -> Result<XmlNode, Error> {
        XmlNode::parse(&response.body)
    }
}

/// Builds `{base_url}/{path}?{params}`.
pub fn build_url(base_url: &str, path: &str, params: &Params) -> Result<Url, Error> {
    let url = Url::parse(
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
        .as_str(),
    )
    .map_err(|e| {
        tracing::error!("Invalid URL constructed: {}", e);
        Error::InvalidUrl(e)
    })?;
    Ok(params.add_to_url(&url))
}

/// Sends one call and decodes its response.
///
/// `params` must already be filtered to the operation's whitelist.
pub async fn execute<T, C>(
    transport: &T,
    base_url: &str,
    credentials: &Credentials,
    call: &C,
    path: &str,
    method: Method,
    params: &Params,
) -> Result<C::Output, Error>
where
    T: Transport,
    C: Call,
{
    let mut request = Request {
        method,
        url: build_url(base_url, path, params)?,
        headers: Vec::new(),
        credentials: credentials.clone(),
        body: None,
    };
    call.prepare(&mut request)?;

    tracing::debug!("{} {}", request.method, request.url);
    let response = transport.send(request).await?;
    check_status(&response)?;
    call.decode(response)
}

/// Maps non-success status codes to the appropriate [`Error`] variant.
fn check_status(response: &RawResponse) -> Result<(), Error> {
    if response.is_success() {
        return Ok(());
    }
    let snippet = truncate_body(&response.body);
    tracing::error!("Request failed with status {}: {}", response.status, snippet);
    match response.status {
        401 | 403 => Err(Error::Authentication {
            status: response.status,
        }),
        status => Err(Error::HttpStatus {
            status,
            body: snippet,
        }),
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_BODY_SNIPPET {
        return body.to_string();
    }
    let mut end = MAX_BODY_SNIPPET;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
