//! WhatsApp Cloud API adapter
//!
//! The single impure surface of the crate: everything here that touches the
//! network is an HTTP call against the Graph API messages endpoint. Format
//! translation stays in [`crate::outbound`] and [`crate::webhook`]; this
//! module wires it to the transport.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::WhatsAppConfig;
use crate::error::Result;
use crate::message::{NormalizedMessage, OutgoingMessage};
use crate::outbound::prepare_message;
use crate::util::mask_for_logging;
use crate::webhook;

/// WhatsApp Cloud API adapter
pub struct WhatsAppAdapter {
    config: WhatsAppConfig,
    client: reqwest::Client,
}

impl WhatsAppAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: WhatsAppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            phone_number_id = %config.phone_number_id,
            api_version = %config.api_version,
            "WhatsApp Cloud API adapter initialized"
        );

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = WhatsAppConfig::from_env()?;
        Self::new(config)
    }

    /// The adapter's configuration
    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Verify a webhook subscribe handshake.
    ///
    /// Returns the challenge to echo back when the mode is `subscribe` and
    /// the token matches the configured verify token, `None` otherwise.
    pub fn verify_webhook(&self, mode: &str, token: &str, challenge: &str) -> Option<String> {
        if mode == "subscribe" && token == self.config.webhook_verify_token {
            info!("WhatsApp webhook verified");
            Some(challenge.to_string())
        } else {
            None
        }
    }

    /// Check if a phone number is on the allowlist (empty allowlist = allow all)
    pub fn is_number_allowed(&self, number: &str) -> bool {
        if self.config.allowed_numbers.is_empty() {
            return true;
        }
        let normalized = normalize_number(number);
        self.config.allowed_numbers.iter().any(|allowed| {
            let norm_allowed = normalize_number(allowed);
            normalized.contains(&norm_allowed) || norm_allowed.contains(&normalized)
        })
    }

    /// Send a message, converting it to the appropriate wire shape.
    ///
    /// Plain text when the message carries no buttons; interactive buttons
    /// for up to three; an interactive list beyond that. Returns the
    /// provider's response body verbatim. Transport failures (network,
    /// timeout, non-2xx status) pass through unmodified; there is no retry
    /// and no interpretation of provider error codes.
    pub async fn send_message(
        &self,
        to: &str,
        message: OutgoingMessage,
    ) -> Result<serde_json::Value> {
        let url = self.config.messages_url();
        let wire = prepare_message(to, &message.text, message.buttons.as_deref());

        debug!(to, text = %mask_for_logging(&message.text), "sending WhatsApp message");

        let body = self
            .client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&wire)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body)
    }

    /// Parse a raw webhook body into a normalized inbound message.
    ///
    /// Stateless; the adapter retains nothing about the message.
    pub fn parse_webhook(&self, payload: &serde_json::Value) -> Result<NormalizedMessage> {
        webhook::parse_webhook(payload)
    }

    /// Mark a message as read
    pub async fn mark_as_read(&self, message_id: &str) -> Result<()> {
        let url = self.config.messages_url();

        #[derive(Serialize)]
        struct ReadRequest<'a> {
            messaging_product: &'static str,
            status: &'static str,
            message_id: &'a str,
        }

        self.client
            .post(&url)
            .bearer_auth(&self.config.access_token)
            .json(&ReadRequest {
                messaging_product: "whatsapp",
                status: "read",
                message_id,
            })
            .send()
            .await?
            .error_for_status()?;

        debug!(message_id, "marked WhatsApp message as read");
        Ok(())
    }
}

/// Strip formatting characters from a phone number for comparison
fn normalize_number(number: &str) -> String {
    number.replace(['+', '-', ' '], "")
}
