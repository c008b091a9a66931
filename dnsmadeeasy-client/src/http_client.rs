//! HTTP transport
//!
//! The façade talks to the API through the [`Transport`] trait: one request in,
//! one raw response out. [`HttpTransport`] is the reqwest implementation that
//! signs every request; tests substitute an in-memory transport.
//!
//! A transport never interprets the status code. 4xx and 5xx responses are
//! returned as ordinary [`RawResponse`]s, only failures to complete the
//! exchange are [`TransportError`]s.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method, Url};

use crate::config::{ClientConfig, Credentials};
use crate::error::TransportError;
use crate::sign::{API_KEY_HEADER, HMAC_HEADER, REQUEST_DATE_HEADER};
use crate::utils::log_sanitizer::{mask_key, truncate_for_log};

const LOG_TARGET: &str = "dnsmadeeasy";

pub(crate) const REQUEST_ID_HEADER: &str = "x-dnsme-requestid";
pub(crate) const REQUESTS_REMAINING_HEADER: &str = "x-dnsme-requestsremaining";
pub(crate) const REQUEST_LIMIT_HEADER: &str = "x-dnsme-requestlimit";

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path and optional query, without a leading slash, e.g. `domains/example.com`.
    pub path: String,
    /// JSON body.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path, None)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path, None)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path, None)
    }

    pub fn post(path: impl Into<String>, body: String) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    fn new(method: Method, path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

/// What came back from the API, whatever the status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// `x-dnsme-requestId`
    pub request_id: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Sends a single request to the API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Signed reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let endpoint = config.endpoint.base_url();
        let base_url = parse_base_url(&endpoint)?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidEndpoint {
                endpoint: format!("{}{path}", self.base_url),
                detail: e.to_string(),
            })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let auth = self.credentials.sign(Utc::now())?;

        log::debug!(
            target: LOG_TARGET,
            "{} {url} (key {})",
            request.method,
            mask_key(&auth.api_key)
        );

        let mut builder = self
            .client
            .request(request.method, url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &auth.api_key)
            .header(REQUEST_DATE_HEADER, &auth.request_date)
            .header(HMAC_HEADER, &auth.hmac);

        if let Some(body) = request.body {
            log::debug!(target: LOG_TARGET, "Request Body: {}", truncate_for_log(&body));
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(send_error)?;

        let status = response.status().as_u16();
        let headers = response.headers();
        let request_id = header_str(headers, REQUEST_ID_HEADER);
        let requests_remaining = header_u32(headers, REQUESTS_REMAINING_HEADER);
        let request_limit = header_u32(headers, REQUEST_LIMIT_HEADER);
        log::debug!(
            target: LOG_TARGET,
            "Response Status: {status}, requestId={request_id:?}, remaining={requests_remaining:?}/{request_limit:?}"
        );

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::Network(format!("Failed to read response body: {e}"))
            }
        })?;
        log::debug!(target: LOG_TARGET, "Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse {
            status,
            body,
            request_id,
        })
    }
}

fn parse_base_url(endpoint: &str) -> Result<Url, TransportError> {
    let invalid = |detail: String| TransportError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        detail,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_string()));
    }
    Ok(url)
}

fn send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        log::error!(target: LOG_TARGET, "Request timed out: {e}");
        TransportError::Timeout(e.to_string())
    } else {
        log::error!(target: LOG_TARGET, "Request failed: {e}");
        TransportError::Network(e.to_string())
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    header_str(headers, name).and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;
    use crate::config::Endpoint;

    fn config(endpoint: Endpoint) -> ClientConfig {
        let mut config = ClientConfig::new(Credentials::new("key", "secret"));
        config.endpoint = endpoint;
        config
    }

    #[test]
    fn production_base_url() {
        let transport = HttpTransport::new(config(Endpoint::Production)).unwrap();
        assert_eq!(transport.base_url(), "https://api.dnsmadeeasy.com/V1.2/");
    }

    #[test]
    fn paths_join_under_the_version_prefix() {
        let transport = HttpTransport::new(config(Endpoint::Sandbox)).unwrap();
        let url = transport.url_for("domains/example.com/records?type=A").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.sandbox.dnsmadeeasy.com/V1.2/domains/example.com/records?type=A"
        );
    }

    #[test]
    fn leading_slash_is_ignored() {
        let transport = HttpTransport::new(config(Endpoint::Production)).unwrap();
        let url = transport.url_for("/domains").unwrap();
        assert_eq!(url.as_str(), "https://api.dnsmadeeasy.com/V1.2/domains");
    }

    #[test]
    fn custom_endpoint_without_trailing_slash() {
        let transport =
            HttpTransport::new(config(Endpoint::Custom("http://127.0.0.1:9000/V1.2".into())))
                .unwrap();
        assert_eq!(
            transport.url_for("domains").unwrap().as_str(),
            "http://127.0.0.1:9000/V1.2/domains"
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = HttpTransport::new(config(Endpoint::Custom("not a url".into()))).unwrap_err();
        assert!(matches!(err, TransportError::InvalidEndpoint { .. }));

        let err = HttpTransport::new(config(Endpoint::Custom("ftp://example.com".into())))
            .unwrap_err();
        assert!(
            matches!(&err, TransportError::InvalidEndpoint { detail, .. } if detail.contains("ftp"))
        );
    }

    #[test]
    fn header_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-dnsme-requestid", HeaderValue::from_static(" abc-123 "));
        headers.insert("x-dnsme-requestsremaining", HeaderValue::from_static("149"));
        headers.insert("x-dnsme-requestlimit", HeaderValue::from_static("many"));

        assert_eq!(header_str(&headers, REQUEST_ID_HEADER).as_deref(), Some("abc-123"));
        assert_eq!(header_u32(&headers, REQUESTS_REMAINING_HEADER), Some(149));
        assert_eq!(header_u32(&headers, REQUEST_LIMIT_HEADER), None);
        assert_eq!(header_str(&headers, "x-missing"), None);
    }

    #[test]
    fn raw_response_carries_status_body_and_request_id() {
        let response = RawResponse::new(201, "{}").with_request_id("req-1");
        assert_eq!(
            response,
            RawResponse {
                status: 201,
                body: "{}".to_string(),
                request_id: Some("req-1".to_string()),
            }
        );
    }

    #[test]
    fn request_constructors() {
        assert_eq!(ApiRequest::get("domains").method, Method::GET);
        assert_eq!(ApiRequest::delete("domains").method, Method::DELETE);
        assert_eq!(ApiRequest::put("domains/a.com").body, None);
        let post = ApiRequest::post("domains/a.com/records", "{}".into());
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body.as_deref(), Some("{}"));
    }
}
