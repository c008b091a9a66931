//! # dnsmadeeasy-client
//!
//! Async client for the [DNS Made Easy](https://dnsmadeeasy.com/) REST API (V1.2).
//!
//! Covers domain management (list, get, add, delete, delete all) and DNS record
//! management (list with optional filters, add). Requests are signed with the
//! account's API key and HMAC-SHA1 of the request date.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dnsmadeeasy_client::{ApiOutcome, DnsMadeEasy, DnsRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DnsMadeEasy::builder("api-key", "secret-key")
//!         .sandbox(true)
//!         .build()?;
//!
//!     match client.list_domains().await? {
//!         ApiOutcome::Success(listing) => {
//!             for domain in listing.domains() {
//!                 println!("{}", domain.name);
//!             }
//!         }
//!         ApiOutcome::Failure(failure) => eprintln!("listing failed: {failure}"),
//!     }
//!
//!     let record = DnsRecord::a("www", "192.0.2.10", 1800);
//!     let outcome = client.add_dns_record("example.com", Some(&record)).await?;
//!     println!("request id: {:?}", outcome.success().flatten());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Operations return `Result<ApiOutcome<T>, DnsMadeEasyError>`:
//!
//! - [`DnsMadeEasyError::MissingArgument`]: a required argument was empty; nothing was sent.
//! - [`DnsMadeEasyError::Request`]: the request could not be completed (network,
//!   timeout, signing, undecodable body). The cause is the error's `source()`.
//! - [`ApiOutcome::Failure`]: the API answered with a non-success status. The
//!   [`ApiFailure`] carries the status and the extracted error messages.

mod api_errors;
mod client;
mod config;
mod error;
mod http_client;
mod records;
mod sign;
mod types;
mod utils;

pub use client::{ClientBuilder, DnsMadeEasy};

pub use config::{
    ClientConfig, Credentials, ENV_API_KEY, ENV_ENDPOINT, ENV_SANDBOX, ENV_SECRET_KEY, Endpoint,
    PRODUCTION_URL, SANDBOX_URL,
};

pub use error::{DnsMadeEasyError, Result, TransportError};

// Transport seam
pub use http_client::{ApiRequest, HttpTransport, RawResponse, Transport};

pub use records::{
    AddressRecord, DnsRecord, HttpRedirectRecord, MxRecord, RecordFields, RecordKind, SrvRecord,
    records_from_json,
};

pub use types::{ApiFailure, ApiOutcome, Domain, DomainListing};

pub use utils::datetime;

pub use reqwest::Method;
