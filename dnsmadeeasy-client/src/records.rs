//! DNS record types and the `type`-tag dispatch.
//!
//! Records arrive as loosely typed JSON objects. [`records_from_json`] turns
//! them into [`DnsRecord`] variants by looking at the `type` field alone. Known
//! tags get their own variant, everything else becomes [`DnsRecord::Generic`].
//! Type-specific values that are missing or unusable are left as `None`, and
//! the raw value stays in `extra`. Dispatch never fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Record kind selected from the `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordKind {
    /// `A` and `AAAA`.
    Address,
    /// `HTTPRED`.
    HttpRedirect,
    /// `MX`.
    Mx,
    /// `SRV`.
    Srv,
    /// Any other tag.
    Generic,
}

impl RecordKind {
    /// Map a `type` tag to a kind. Matching is exact; unknown tags map to `Generic`.
    ///
    /// `AAAA` shares [`Address`](Self::Address) with `A`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "A" | "AAAA" => Self::Address,
            "HTTPRED" => Self::HttpRedirect,
            "MX" => Self::Mx,
            "SRV" => Self::Srv,
            _ => Self::Generic,
        }
    }
}

/// Attributes shared by every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    /// Provider-assigned record id; absent on records not yet created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Record name relative to the domain (empty for the apex).
    pub name: String,
    /// Type tag as sent by the API, e.g. `"MX"`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record value (`data` on the wire).
    #[serde(rename = "data")]
    pub value: String,
    /// Time to live in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Global Traffic Director location, e.g. `"DEFAULT"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtd_location: Option<String>,
    /// Domain the record belongs to. Filled in by the client, never sent.
    #[serde(skip)]
    pub domain: Option<String>,
    /// Attributes not covered above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RecordFields {
    fn new(record_type: &str, name: &str, value: &str, ttl: u32) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Self {
        Self {
            id: take(&mut map, "id", as_u64),
            name: take(&mut map, "name", as_string).unwrap_or_default(),
            record_type: take(&mut map, "type", as_string).unwrap_or_default(),
            value: take(&mut map, "data", as_string).unwrap_or_default(),
            ttl: take(&mut map, "ttl", |v| as_u64(v).and_then(|n| u32::try_from(n).ok())),
            gtd_location: take(&mut map, "gtdLocation", as_string),
            domain: None,
            extra: map.into_iter().collect(),
        }
    }

    fn take_extra<T>(&mut self, key: &str, convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
        let converted = self.extra.get(key).and_then(convert)?;
        self.extra.remove(key);
        Some(converted)
    }
}

/// `A` or `AAAA` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRecord {
    /// Common attributes; the value is the IP address.
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl AddressRecord {
    /// The IP address.
    pub fn address(&self) -> &str {
        &self.fields.value
    }

    /// Whether the record was tagged `AAAA`.
    pub fn is_ipv6(&self) -> bool {
        self.fields.record_type == "AAAA"
    }
}

/// `HTTPRED` (HTTP redirection) record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRedirectRecord {
    /// Common attributes; the value is the redirect target URL.
    #[serde(flatten)]
    pub fields: RecordFields,
    /// Redirect type, e.g. `"Standard - 301"` or `"Hidden Frame Masked"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<String>,
    /// Hard link flag: when set, the request path is not appended to the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_link: Option<bool>,
    /// Page title for masked redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta keywords for masked redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Meta description for masked redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HttpRedirectRecord {
    /// The redirect target URL.
    pub fn target(&self) -> &str {
        &self.fields.value
    }
}

/// `MX` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MxRecord {
    /// Common attributes; the value is the mail exchanger host.
    #[serde(flatten)]
    pub fields: RecordFields,
    /// Preference (lower is preferred).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_level: Option<u16>,
}

/// `SRV` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SrvRecord {
    /// Common attributes; the value is the target host.
    #[serde(flatten)]
    pub fields: RecordFields,
    /// Priority (lower is preferred).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Relative weight among targets of equal priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// Service port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// A DNS record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DnsRecord {
    /// `A` / `AAAA`.
    Address(AddressRecord),
    /// `HTTPRED`.
    HttpRedirect(HttpRedirectRecord),
    /// `MX`.
    Mx(MxRecord),
    /// `SRV`.
    Srv(SrvRecord),
    /// Any other type.
    Generic(RecordFields),
}

impl DnsRecord {
    /// New `A` record.
    pub fn a(name: &str, address: &str, ttl: u32) -> Self {
        Self::Address(AddressRecord {
            fields: RecordFields::new("A", name, address, ttl),
        })
    }

    /// New `AAAA` record.
    pub fn aaaa(name: &str, address: &str, ttl: u32) -> Self {
        Self::Address(AddressRecord {
            fields: RecordFields::new("AAAA", name, address, ttl),
        })
    }

    /// New `MX` record.
    pub fn mx(name: &str, exchange: &str, mx_level: u16, ttl: u32) -> Self {
        Self::Mx(MxRecord {
            fields: RecordFields::new("MX", name, exchange, ttl),
            mx_level: Some(mx_level),
        })
    }

    /// New `SRV` record.
    pub fn srv(name: &str, target: &str, priority: u16, weight: u16, port: u16, ttl: u32) -> Self {
        Self::Srv(SrvRecord {
            fields: RecordFields::new("SRV", name, target, ttl),
            priority: Some(priority),
            weight: Some(weight),
            port: Some(port),
        })
    }

    /// New `HTTPRED` record.
    pub fn http_redirect(
        name: &str,
        target: &str,
        redirect_type: &str,
        hard_link: bool,
        ttl: u32,
    ) -> Self {
        Self::HttpRedirect(HttpRedirectRecord {
            fields: RecordFields::new("HTTPRED", name, target, ttl),
            redirect_type: Some(redirect_type.to_string()),
            hard_link: Some(hard_link),
            title: None,
            keywords: None,
            description: None,
        })
    }

    /// New record of a type without a dedicated variant, e.g. `CNAME` or `TXT`.
    pub fn generic(record_type: &str, name: &str, value: &str, ttl: u32) -> Self {
        Self::Generic(RecordFields::new(record_type, name, value, ttl))
    }

    /// Build a record from one JSON object.
    pub fn from_object(map: Map<String, Value>) -> Self {
        let mut fields = RecordFields::from_object(map);

        match RecordKind::from_tag(&fields.record_type) {
            RecordKind::Address => Self::Address(AddressRecord { fields }),
            RecordKind::HttpRedirect => Self::HttpRedirect(HttpRedirectRecord {
                redirect_type: fields.take_extra("redirectType", as_string),
                hard_link: fields.take_extra("hardLink", Value::as_bool),
                title: fields.take_extra("title", as_string),
                keywords: fields.take_extra("keywords", as_string),
                description: fields.take_extra("description", as_string),
                fields,
            }),
            RecordKind::Mx => Self::Mx(MxRecord {
                mx_level: fields.take_extra("mxLevel", as_u16),
                fields,
            }),
            RecordKind::Srv => Self::Srv(SrvRecord {
                priority: fields.take_extra("priority", as_u16),
                weight: fields.take_extra("weight", as_u16),
                port: fields.take_extra("port", as_u16),
                fields,
            }),
            RecordKind::Generic => Self::Generic(fields),
        }
    }

    /// The variant of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Address(_) => RecordKind::Address,
            Self::HttpRedirect(_) => RecordKind::HttpRedirect,
            Self::Mx(_) => RecordKind::Mx,
            Self::Srv(_) => RecordKind::Srv,
            Self::Generic(_) => RecordKind::Generic,
        }
    }

    /// Attributes shared by every record.
    pub fn fields(&self) -> &RecordFields {
        match self {
            Self::Address(r) => &r.fields,
            Self::HttpRedirect(r) => &r.fields,
            Self::Mx(r) => &r.fields,
            Self::Srv(r) => &r.fields,
            Self::Generic(fields) => fields,
        }
    }

    /// Mutable access to the shared attributes.
    pub fn fields_mut(&mut self) -> &mut RecordFields {
        match self {
            Self::Address(r) => &mut r.fields,
            Self::HttpRedirect(r) => &mut r.fields,
            Self::Mx(r) => &mut r.fields,
            Self::Srv(r) => &mut r.fields,
            Self::Generic(fields) => fields,
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.fields().id
    }

    pub fn name(&self) -> &str {
        &self.fields().name
    }

    pub fn record_type(&self) -> &str {
        &self.fields().record_type
    }

    pub fn value(&self) -> &str {
        &self.fields().value
    }

    pub fn ttl(&self) -> Option<u32> {
        self.fields().ttl
    }

    pub fn domain(&self) -> Option<&str> {
        self.fields().domain.as_deref()
    }

    /// Attach the domain the record belongs to.
    #[must_use]
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.fields_mut().domain = Some(domain.to_string());
        self
    }

    /// One-line dump of the record, used in error messages.
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl<'de> Deserialize<'de> for DnsRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self::from_object(map)),
            other => Err(D::Error::custom(format!(
                "expected a DNS record object, got {other}"
            ))),
        }
    }
}

/// Turn a decoded records body into typed records.
///
/// Accepts an array of record objects, or an object wrapping one under `data`
/// or `list`. Anything else (including `null`) yields an empty vector.
/// Array entries that are not objects are skipped.
pub fn records_from_json(value: Value) -> Vec<DnsRecord> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("list")) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(DnsRecord::from_object(map)),
            other => {
                log::warn!("Skipping non-object record entry: {other}");
                None
            }
        })
        .collect()
}

// ============ Lenient value conversion ============

/// Removes `key` from the map; a value that does not convert is dropped.
fn take<T>(
    map: &mut Map<String, Value>,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    map.remove(key).and_then(|v| convert(&v))
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u16(value: &Value) -> Option<u16> {
    as_u64(value).and_then(|n| u16::try_from(n).ok())
}
