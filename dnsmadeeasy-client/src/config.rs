//! Client configuration: credentials, endpoint and timeouts.

use std::env;
use std::time::Duration;

use crate::error::{DnsMadeEasyError, Result};
use crate::utils::log_sanitizer::mask_key;

/// Production API base URL.
pub const PRODUCTION_URL: &str = "https://api.dnsmadeeasy.com/V1.2/";
/// Sandbox API base URL.
pub const SANDBOX_URL: &str = "https://api.sandbox.dnsmadeeasy.com/V1.2/";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "DNSMADEEASY_API_KEY";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "DNSMADEEASY_SECRET_KEY";
/// Environment variable selecting the sandbox (`1` or `true`).
pub const ENV_SANDBOX: &str = "DNSMADEEASY_SANDBOX";
/// Environment variable overriding the base URL.
pub const ENV_ENDPOINT: &str = "DNSMADEEASY_ENDPOINT";

/// Default connect timeout (seconds).
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which API deployment to talk to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Endpoint {
    /// `api.dnsmadeeasy.com`.
    #[default]
    Production,
    /// `api.sandbox.dnsmadeeasy.com`.
    Sandbox,
    /// Any other base URL (proxies, test servers).
    Custom(String),
}

impl Endpoint {
    /// Base URL, always ending in `/` so relative paths join under it.
    pub fn base_url(&self) -> String {
        match self {
            Self::Production => PRODUCTION_URL.to_string(),
            Self::Sandbox => SANDBOX_URL.to_string(),
            Self::Custom(url) if url.ends_with('/') => url.clone(),
            Self::Custom(url) => format!("{url}/"),
        }
    }
}

/// API key pair issued in the DNS Made Easy control panel.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) api_key: String,
    pub(crate) secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read [`ENV_API_KEY`] and [`ENV_SECRET_KEY`].
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(ENV_API_KEY).unwrap_or_default();
        let secret_key = env::var(ENV_SECRET_KEY).unwrap_or_default();
        let credentials = Self::new(api_key, secret_key);
        credentials.validate()?;
        Ok(credentials)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Both keys must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(DnsMadeEasyError::MissingArgument("API key"));
        }
        if self.secret_key.trim().is_empty() {
            return Err(DnsMadeEasyError::MissingArgument("secret key"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &mask_key(&self.api_key))
            .field("secret_key", &"****")
            .finish()
    }
}

/// Everything needed to build an HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub endpoint: Endpoint,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: Endpoint::default(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Read credentials plus the optional [`ENV_SANDBOX`] and [`ENV_ENDPOINT`] overrides.
    ///
    /// [`ENV_ENDPOINT`] wins over [`ENV_SANDBOX`] when both are set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(Credentials::from_env()?);

        if env::var(ENV_SANDBOX).is_ok_and(|v| is_truthy(&v)) {
            config.endpoint = Endpoint::Sandbox;
        }
        if let Ok(url) = env::var(ENV_ENDPOINT)
            && !url.trim().is_empty()
        {
            config.endpoint = Endpoint::Custom(url.trim().to_string());
        }

        log::debug!(
            "Loaded DNS Made Easy config from environment: key={}, endpoint={}",
            mask_key(config.credentials.api_key()),
            config.endpoint.base_url()
        );
        Ok(config)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
