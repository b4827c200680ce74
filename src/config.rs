//! WhatsApp Cloud API configuration

use crate::error::{Error, Result};
use serde::Deserialize;

/// Default Graph API base URL
const DEFAULT_API_BASE: &str = "https://graph.facebook.com";

/// Default Graph API version
const DEFAULT_API_VERSION: &str = "v18.0";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// WhatsApp Cloud API configuration.
///
/// An immutable value handed to [`crate::WhatsAppAdapter::new`] at
/// construction; the adapter holds no other state.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatsAppConfig {
    /// Access token (from Meta Business Suite). Never logged.
    pub access_token: String,
    /// Phone Number ID path fragment appended to the API version in the
    /// messages endpoint, leading slash included (e.g. `/105954558954427`).
    pub phone_number_id: String,
    /// Webhook verify token (for the webhook subscribe handshake)
    #[serde(default = "default_verify_token")]
    pub webhook_verify_token: String,
    /// Allowed phone numbers (empty = allow all)
    #[serde(default)]
    pub allowed_numbers: Vec<String>,
    /// Graph API version (default: v18.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Graph API base URL. Only overridden in tests.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_verify_token() -> String {
    "whatsapp_webhook_verify".to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl WhatsAppConfig {
    /// Create with required fields, defaults for everything else
    #[must_use]
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            phone_number_id: phone_number_id.into(),
            webhook_verify_token: default_verify_token(),
            allowed_numbers: Vec::new(),
            api_version: default_api_version(),
            api_base: default_api_base(),
            request_timeout_secs: default_timeout(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `WHATSAPP_ACCESS_TOKEN`, `WHATSAPP_PHONE_NUMBER_ID`.
    /// Optional: `WHATSAPP_WEBHOOK_VERIFY_TOKEN`, `WHATSAPP_ALLOWED_NUMBERS`
    /// (comma-separated), `WHATSAPP_API_VERSION`, `WHATSAPP_TIMEOUT`.
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("WHATSAPP_ACCESS_TOKEN")
            .map_err(|_| Error::Config("WHATSAPP_ACCESS_TOKEN not set".to_string()))?;

        let phone_number_id = std::env::var("WHATSAPP_PHONE_NUMBER_ID")
            .map_err(|_| Error::Config("WHATSAPP_PHONE_NUMBER_ID not set".to_string()))?;

        let webhook_verify_token =
            std::env::var("WHATSAPP_WEBHOOK_VERIFY_TOKEN").unwrap_or_else(|_| default_verify_token());

        let allowed_numbers: Vec<String> = std::env::var("WHATSAPP_ALLOWED_NUMBERS")
            .ok()
            .map(|s| s.split(',').map(|n| n.trim().to_string()).collect())
            .unwrap_or_default();

        let api_version =
            std::env::var("WHATSAPP_API_VERSION").unwrap_or_else(|_| default_api_version());

        let request_timeout_secs = std::env::var("WHATSAPP_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_timeout);

        Ok(Self {
            access_token,
            phone_number_id,
            webhook_verify_token,
            allowed_numbers,
            api_version,
            api_base: default_api_base(),
            request_timeout_secs,
        })
    }

    /// Set webhook verify token
    #[must_use]
    pub fn with_webhook_verify_token(mut self, token: impl Into<String>) -> Self {
        self.webhook_verify_token = token.into();
        self
    }

    /// Set allowed numbers
    #[must_use]
    pub fn with_allowed_numbers(mut self, numbers: Vec<String>) -> Self {
        self.allowed_numbers = numbers;
        self
    }

    /// Set Graph API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set Graph API base URL (used by tests to point at a local server)
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Set request timeout in seconds
    #[must_use]
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Get the API URL for the messages endpoint.
    ///
    /// The phone number identifier is appended directly after the API
    /// version (it carries its own leading slash).
    pub(crate) fn messages_url(&self) -> String {
        format!(
            "{}/{}{}/messages",
            self.api_base, self.api_version, self.phone_number_id
        )
    }
}
