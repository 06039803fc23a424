//! Error types for the API client.

/// Errors that can occur when validating, sending or decoding API calls.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// One or more query parameters are not accepted by the operation.
    #[error("Invalid params filter: {}", .keys.join(", "))]
    InvalidParameter { keys: Vec<String> },

    /// A create payload omits fields the resource requires.
    #[error("Required params: {}", .fields.join(", "))]
    MissingRequiredField { fields: Vec<String> },

    /// A field name that the resource does not declare.
    #[error("Unknown field `{field}` for {resource}")]
    UnknownField {
        resource: &'static str,
        field: String,
    },

    /// The write payload could not be turned into a JSON object.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server rejected the credentials.
    #[error("Authentication failed with status {status}")]
    Authentication { status: u16 },

    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },

    /// The request URL could not be built from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connection or HTTP-layer failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Returns `true` for errors raised locally, before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. }
                | Error::MissingRequiredField { .. }
                | Error::UnknownField { .. }
                | Error::InvalidPayload(_)
        )
    }
}
