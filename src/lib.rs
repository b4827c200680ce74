//! WhatsApp Cloud Channel - WhatsApp Business Cloud API adapter
//!
//! This crate converts between a conversational agent's normalized message
//! format and the WhatsApp Cloud API wire format:
//!
//! - **Outbound**: a reply (recipient, text, optional quick-reply buttons)
//!   becomes one of three Cloud API message shapes (plain text, interactive
//!   buttons, interactive list) and is POSTed to the Graph API.
//! - **Inbound**: a raw webhook body becomes a [`NormalizedMessage`] or a
//!   validation error.
//!
//! The format translation itself is pure; [`WhatsAppAdapter::send_message`]
//! is the only operation with a side effect (the HTTP call). Retries,
//! webhook signature verification, rate limiting and delivery tracking are
//! the caller's concern.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod message;
pub mod outbound;
pub mod util;
pub mod webhook;

pub use adapter::WhatsAppAdapter;
pub use config::WhatsAppConfig;
pub use error::{Error, Result};
pub use message::{Button, NormalizedMessage, OutgoingMessage};
pub use outbound::{prepare_message, WireMessage};
pub use webhook::{parse_webhook, WebhookPayload};
