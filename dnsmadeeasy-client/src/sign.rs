//! DNS Made Easy request signing (HMAC-SHA1 over the request date).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::Credentials;
use crate::error::TransportError;

type HmacSha1 = Hmac<Sha1>;

pub(crate) const API_KEY_HEADER: &str = "x-dnsme-apiKey";
pub(crate) const REQUEST_DATE_HEADER: &str = "x-dnsme-requestDate";
pub(crate) const HMAC_HEADER: &str = "x-dnsme-hmac";

/// Header values authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthHeaders {
    pub api_key: String,
    pub request_date: String,
    pub hmac: String,
}

/// HTTP date as the API expects it, e.g. `Sat, 12 Feb 2011 20:59:04 GMT`.
pub(crate) fn request_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub(crate) fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> Result<String, TransportError> {
    let mut mac =
        HmacSha1::new_from_slice(key).map_err(|e| TransportError::Signature(e.to_string()))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

impl Credentials {
    /// Build the authentication headers for a request sent at `at`.
    pub(crate) fn sign(&self, at: DateTime<Utc>) -> Result<AuthHeaders, TransportError> {
        let request_date = request_date(at);
        let hmac = hmac_sha1_hex(self.secret_key.as_bytes(), request_date.as_bytes())?;

        Ok(AuthHeaders {
            api_key: self.api_key.clone(),
            request_date,
            hmac,
        })
    }
}
