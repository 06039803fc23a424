//! Typed client for the HolidayLink travel API.
//!
//! Resource types ([`types::Action`], [`types::MediaDescription`],
//! [`types::SeaLangs`], ...) declare their path, field schema and the
//! operations they support. [`Client`] turns those declarations into HTTP
//! calls: query parameters are checked against each operation's whitelist,
//! create payloads against the resource's required fields, reads are decoded
//! from XML into [`Record`]s and writes are sent as JSON.
//!
//! ```no_run
//! use holidaylink_api::{types::Action, Client, Credentials, Params};
//!
//! # async fn run() -> Result<(), holidaylink_api::Error> {
//! let client = Client::new(Credentials::new("key", "secret"))?;
//! let action = client
//!     .single_from_xml::<Action>("ACT123", &Params::new().with_expand())
//!     .await?;
//! println!("{:?}", action.get_str("status")?);
//! # Ok(())
//! # }
//! ```

pub mod call;
mod client;
pub mod config;
mod credentials;
mod errors;
pub mod model;
mod query;
pub mod resource;
pub mod transport;
pub mod types;
pub mod xml;

pub use self::client::Client;
pub use self::config::ClientConfig;
pub use self::credentials::Credentials;
pub use self::errors::Error;
pub use self::model::{FieldValue, Record, RecordSet};
pub use self::query::{Params, EXPAND, LANGUAGE, PAGE};
pub use self::resource::{Collection, Create, Delete, Resource, Single, Update};
pub use self::transport::{HttpTransport, Method, RawResponse, Request, Transport};
pub use self::xml::XmlNode;
