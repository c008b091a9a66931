//! DNS Made Easy API client

mod domains;
mod records;

use std::time::Duration;

use serde_json::Value;

use crate::api_errors::capture_errors;
use crate::config::{ClientConfig, Credentials, Endpoint};
use crate::error::{DnsMadeEasyError, Result, TransportError};
use crate::http_client::{ApiRequest, HttpTransport, RawResponse, Transport};
use crate::types::ApiOutcome;
use crate::utils::log_sanitizer::truncate_for_log;

/// Client for the DNS Made Easy V1.2 REST API.
///
/// Every operation sends exactly one request and reports in two channels:
/// `Err` for a missing argument or a request that could not be completed,
/// `Ok(ApiOutcome)` for whatever the API answered. The client holds no
/// per-call state and can be shared between tasks.
#[derive(Debug, Clone)]
pub struct DnsMadeEasy<T = HttpTransport> {
    transport: T,
}

/// Builder for a [`DnsMadeEasy`] client using the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            config: ClientConfig::new(credentials),
        }
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.config.endpoint = endpoint;
        self
    }

    /// Switch between the sandbox and production deployments.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.endpoint = if sandbox {
            Endpoint::Sandbox
        } else {
            Endpoint::Production
        };
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<DnsMadeEasy<HttpTransport>> {
        DnsMadeEasy::from_config(self.config)
    }
}

impl DnsMadeEasy<HttpTransport> {
    /// Production client with default timeouts.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key, secret_key).build()
    }

    pub fn builder(api_key: impl Into<String>, secret_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(Credentials::new(api_key, secret_key))
    }

    /// Client configured from `DNSMADEEASY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.credentials.validate()?;
        let transport = HttpTransport::new(config).map_err(|e| {
            log::error!("Failed to create DNS Made Easy client: {e}");
            DnsMadeEasyError::request("Unable to create the DNS Made Easy client.", e)
        })?;
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> DnsMadeEasy<T> {
    /// Client sending requests through a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one request; a transport fault becomes a [`DnsMadeEasyError::Request`].
    async fn send(&self, request: ApiRequest, operation: &str) -> Result<RawResponse> {
        self.transport.perform(request).await.map_err(|source| {
            log::error!("{operation} ({source})");
            DnsMadeEasyError::request(operation, source)
        })
    }
}

// ============ Response helpers ============

/// Decode a success body as JSON; an empty body decodes to `null`.
fn decode_body(response: &RawResponse, operation: &str) -> Result<Value> {
    let body = response.body.trim();
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| decode_fault(operation, &response.body, &e))
}

fn decode_fault(operation: &str, body: &str, e: &serde_json::Error) -> DnsMadeEasyError {
    log::error!("{operation} JSON parse failed: {e}");
    log::error!("Raw response: {}", truncate_for_log(body));
    DnsMadeEasyError::request(operation, TransportError::Parse(e.to_string()))
}

/// Failure outcome with messages captured from the response body.
fn failure<V>(
    response: &RawResponse,
    expected_failure_status: Option<u16>,
    operation: &str,
) -> ApiOutcome<V> {
    let errors = capture_errors(&response.body, response.status, expected_failure_status);
    log_failure(operation, response.status, &errors);
    ApiOutcome::failure(response.status, errors)
}

fn log_failure(operation: &str, status: u16, errors: &[String]) {
    log::warn!(
        "{operation} API answered HTTP {status}: {}",
        truncate_for_log(&errors.join("; "))
    );
}

// ============ Paths ============

fn domains_path() -> String {
    "domains".to_string()
}

fn domain_path(name: &str) -> String {
    format!("domains/{}", urlencoding::encode(name))
}

fn records_path(domain: &str, record_type: Option<&str>, gtd_location: Option<&str>) -> String {
    let query: Vec<String> = [("type", record_type), ("gtdLocation", gtd_location)]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{key}={}", urlencoding::encode(v)))
        })
        .collect();

    let path = format!("{}/records", domain_path(domain));
    if query.is_empty() {
        path
    } else {
        format!("{path}?{}", query.join("&"))
    }
}
