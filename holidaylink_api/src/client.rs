//! HTTP client for the HolidayLink API.

use serde::Serialize;

use crate::{
    call::{execute, JsonCall, SimpleCall, XmlCall},
    config::ClientConfig,
    model::{Record, RecordSet},
    query::Params,
    resource::{Collection, Create, Delete, Single, Update},
    transport::{HttpTransport, Method, RawResponse, Transport},
    Credentials, Error,
};

/// One API session: base URL, transport and the credentials sent with
/// every call.
///
/// Every operation validates its inputs before touching the network, so an
/// `Err` for which [`Error::is_validation`] is true means nothing was sent.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    base_api_url: String,
    transport: T,
    credentials: Credentials,
}

impl Client<HttpTransport> {
    /// Creates a new client pointing at the production API.
    pub fn new(credentials: Credentials) -> Result<Self, Error> {
        Self::from_config(&ClientConfig::default(), credentials)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::from_config(&ClientConfig::default().with_base_url(base_url), credentials)
    }

    pub fn from_config(config: &ClientConfig, credentials: Credentials) -> Result<Self, Error> {
        Ok(Self::with_transport(
            &config.base_url,
            HttpTransport::new(config)?,
            credentials,
        ))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client on top of any transport.
    pub fn with_transport(base_url: &str, transport: T, credentials: Credentials) -> Self {
        Self {
            base_api_url: base_url.to_string(),
            transport,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replaces the credentials used by later calls on this session.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// A second session that shares this transport but sends `credentials`.
    pub fn with_credentials(&self, credentials: Credentials) -> Self
    where
        T: Clone,
    {
        Self {
            base_api_url: self.base_api_url.clone(),
            transport: self.transport.clone(),
            credentials,
        }
    }

    /// Fetches a single record by code: `GET {PATH}/{code}`.
    pub async fn single_from_xml<R: Single>(
        &self,
        code: &str,
        params: &Params,
    ) -> Result<Record<R>, Error> {
        params.validate(R::SINGLE_PARAMS)?;
        let node = execute(
            &self.transport,
            &self.base_api_url,
            &self.credentials,
            &XmlCall,
            &R::item_path(code),
            Method::Get,
            &params.filtered(R::SINGLE_PARAMS),
        )
        .await?;
        Ok(Record::from_xml(&node))
    }

    /// Fetches a collection: `GET {PATH}`. One record per child of the
    /// response root, in document order.
    pub async fn all_from_xml<R: Collection>(
        &self,
        params: &Params,
    ) -> Result<RecordSet<R::Item>, Error> {
        params.validate(R::COLLECTION_PARAMS)?;
        let node = execute(
            &self.transport,
            &self.base_api_url,
            &self.credentials,
            &XmlCall,
            R::PATH,
            Method::Get,
            &params.filtered(R::COLLECTION_PARAMS),
        )
        .await?;
        Ok(RecordSet::from_xml(&node))
    }

    /// Creates a record: `POST {PATH}` with `data` as the JSON body.
    ///
    /// `data` must serialize to a JSON object containing every key in
    /// `R::REQUIRED_FIELDS`. Presence is checked by key, so empty strings
    /// count. The server's decoded response is returned unchanged.
    pub async fn create_single<R: Create, D: Serialize + ?Sized>(
        &self,
        params: &Params,
        data: &D,
    ) -> Result<serde_json::Value, Error> {
        params.validate(R::CREATE_PARAMS)?;
        let body = payload(data)?;
        let missing: Vec<String> = R::REQUIRED_FIELDS
            .iter()
            .filter(|field| !body.contains_key(**field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            tracing::warn!("{} payload is missing: {}", R::NAME, missing.join(", "));
            return Err(Error::MissingRequiredField { fields: missing });
        }

        execute(
            &self.transport,
            &self.base_api_url,
            &self.credentials,
            &JsonCall::new(serde_json::Value::Object(body)),
            R::PATH,
            Method::Post,
            &params.filtered(R::CREATE_PARAMS),
        )
        .await
    }

    /// Updates a record: `PUT {PATH}/{code}` with `data` as the JSON body.
    ///
    /// Partial payloads are allowed; required fields are only enforced on create.
    pub async fn update_single<R: Update, D: Serialize + ?Sized>(
        &self,
        code: &str,
        params: &Params,
        data: &D,
    ) -> Result<serde_json::Value, Error> {
        params.validate(R::UPDATE_PARAMS)?;
        let body = payload(data)?;
        execute(
            &self.transport,
            &self.base_api_url,
            &self.credentials,
            &JsonCall::new(serde_json::Value::Object(body)),
            &R::item_path(code),
            Method::Put,
            &params.filtered(R::UPDATE_PARAMS),
        )
        .await
    }

    /// Deletes a record: `DELETE {PATH}/{code}`. Takes no query parameters.
    pub async fn delete_single<R: Delete>(&self, code: &str) -> Result<RawResponse, Error> {
        execute(
            &self.transport,
            &self.base_api_url,
            &self.credentials,
            &SimpleCall,
            &R::item_path(code),
            Method::Delete,
            &Params::new(),
        )
        .await
    }
}

/// Serializes a write payload, which must be a JSON object.
fn payload<D: Serialize + ?Sized>(data: &D) -> Result<serde_json::Map<String, serde_json::Value>, Error> {
    match serde_json::to_value(data) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(Error::InvalidPayload(e.to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
