use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Outcome ============

/// Result of a request that reached the API.
///
/// `Success` carries the mapped value for the operation's success status.
/// `Failure` carries the status the API answered with and the error messages
/// extracted from the body. Callers that only care about success can use
/// [`success`](Self::success) or [`into_result`](Self::into_result).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "camelCase")]
pub enum ApiOutcome<T> {
    /// The API answered with the operation's success status.
    Success(T),
    /// The API answered with any other status.
    Failure(ApiFailure),
}

/// A business-level rejection reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    /// HTTP status code of the response.
    pub status: u16,
    /// Human-readable error messages.
    pub errors: Vec<String>,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.errors.join("; "))
    }
}

impl<T> ApiOutcome<T> {
    pub(crate) fn failure(status: u16, errors: Vec<String>) -> Self {
        Self::Failure(ApiFailure { status, errors })
    }

    /// Whether the API answered with the success status.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, discarding failure details.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The failure details, if any.
    pub fn as_failure(&self) -> Option<&ApiFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Error messages of a failure; empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(failure) => &failure.errors,
        }
    }

    /// Convert into a plain `Result`.
    pub fn into_result(self) -> std::result::Result<T, ApiFailure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(failure) => Err(failure),
        }
    }

    /// Map the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Success(value) => ApiOutcome::Success(f(value)),
            Self::Failure(failure) => ApiOutcome::Failure(failure),
        }
    }
}

// ============ Domain ============

/// A domain (zone) managed by DNS Made Easy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Domain name, e.g. `"example.com"`.
    pub name: String,

    /// Provider-assigned domain id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Whether Global Traffic Director is enabled.
    #[serde(default)]
    pub gtd_enabled: bool,

    /// Name servers the domain is delegated to.
    #[serde(default, rename = "nameServer", skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,

    /// Vanity name server configuration id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanity_id: Option<u64>,

    /// When the domain was created.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<chrono::DateTime<chrono::Utc>>,

    /// When the domain was last updated.
    #[serde(default, with = "crate::utils::datetime")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<chrono::DateTime<chrono::Utc>>,

    /// Any other attributes returned by the API.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Domain {
    /// A domain known only by its name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            gtd_enabled: false,
            name_servers: Vec::new(),
            vanity_id: None,
            created: None,
            updated: None,
            extra: BTreeMap::new(),
        }
    }

    /// Build a domain from a decoded JSON value.
    ///
    /// A JSON string is taken as the domain name; an object is parsed field by field.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        match value {
            Value::String(name) => Ok(Self::named(name)),
            other => serde_json::from_value(other),
        }
    }
}

/// Result of listing domains.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DomainListing {
    /// The body had the expected `{"list": [...]}` shape.
    Domains(Vec<Domain>),
    /// The body had some other shape; it is passed through untouched.
    Unrecognized(String),
}

impl DomainListing {
    /// Interpret a listing body.
    pub(crate) fn from_body(body: &str) -> Self {
        let list = serde_json::from_str::<Value>(body).ok().and_then(|mut v| {
            match v.get_mut("list").map(Value::take) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            }
        });

        let Some(items) = list else {
            log::warn!("Unexpected domain listing shape, returning raw body");
            return Self::Unrecognized(body.to_string());
        };

        let domains = items
            .into_iter()
            .filter_map(|item| match Domain::from_value(item) {
                Ok(domain) => Some(domain),
                Err(e) => {
                    log::warn!("Skipping unparseable domain listing entry: {e}");
                    None
                }
            })
            .collect();
        Self::Domains(domains)
    }

    /// The parsed domains, or an empty slice for an unrecognized body.
    pub fn domains(&self) -> &[Domain] {
        match self {
            Self::Domains(domains) => domains,
            Self::Unrecognized(_) => &[],
        }
    }
}
