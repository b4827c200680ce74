//! Normalized message types
//!
//! The framework-side representation of messages, independent of the
//! WhatsApp wire format. [`crate::outbound`] and [`crate::webhook`] convert
//! between these and the Cloud API JSON shapes.

use serde::{Deserialize, Serialize};

/// A quick-reply button attached to an outgoing message.
///
/// Titles may be arbitrarily long here; they are truncated to the platform
/// limits (20 chars for reply buttons, 24 for list rows) during conversion,
/// never rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Button {
    /// Button label shown to the user
    pub title: String,
    /// Opaque action identifier returned when the button is tapped
    pub payload: String,
}

impl Button {
    /// Create a new button
    #[must_use]
    pub fn new(title: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: payload.into(),
        }
    }
}

/// A normalized outgoing message.
///
/// `buttons` being `Some` (even `Some(vec![])`) selects the interactive
/// message path; `None` selects plain text. Presence of the field, not its
/// length, is what routes the message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Text content
    pub text: String,
    /// Quick-reply buttons, if any
    pub buttons: Option<Vec<Button>>,
}

impl OutgoingMessage {
    /// Create a plain text message
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: content.into(),
            buttons: None,
        }
    }

    /// Attach quick-reply buttons
    #[must_use]
    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = Some(buttons);
        self
    }
}

/// A normalized inbound message extracted from a webhook payload.
///
/// Constructed fresh per webhook call and returned to the caller; nothing is
/// retained by the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedMessage {
    /// Sender identifier (the `from` field of the webhook message)
    pub sender_id: String,
    /// Message text, or the tapped button/list-row id for interactive replies
    pub text: String,
    /// Reserved for future extension; always empty today
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl NormalizedMessage {
    /// Create a new normalized message with empty metadata
    #[must_use]
    pub fn new(sender_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            text: text.into(),
            metadata: serde_json::Map::new(),
        }
    }
}
