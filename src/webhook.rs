//! Inbound webhook payload types and validation
//!
//! The Cloud API delivers messages at the fixed path
//! `entry[0].changes[0].value.messages[0]`. Every subtree here is optional
//! so that malformed payloads still deserialize; the explicit validation
//! pass in [`extract_message`] then rejects them with a single
//! [`Error::Validation`] kind naming what was missing. No partial result is
//! ever returned.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::message::NormalizedMessage;

/// Top-level webhook payload from the Cloud API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    /// Object type (`"whatsapp_business_account"` for message events)
    #[serde(default)]
    pub object: Option<String>,
    /// Entry array
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

/// Webhook entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEntry {
    /// Business Account ID
    #[serde(default)]
    pub id: Option<String>,
    /// Changes array
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

/// Webhook change event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookChange {
    /// Value containing the actual message data
    pub value: Option<WebhookValue>,
    /// Field name
    #[serde(default)]
    pub field: Option<String>,
}

/// Webhook value containing message data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookValue {
    /// Messages
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
}

/// A message inside a webhook value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookMessage {
    /// Sender phone number
    pub from: Option<String>,
    /// Message type (`"text"`, `"interactive"`, ...)
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    /// Text content (for text messages)
    pub text: Option<TextContent>,
    /// Interactive reply content (for button/list replies)
    pub interactive: Option<InteractiveContent>,
}

/// Text content in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// Message body
    pub body: String,
}

/// Interactive reply content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveContent {
    /// Interactive subtype (`"button_reply"` or `"list_reply"`)
    #[serde(rename = "type")]
    pub interactive_type: Option<String>,
    /// Button reply (when subtype is `"button_reply"`)
    pub button_reply: Option<ReplyContent>,
    /// List reply (when subtype is `"list_reply"`)
    pub list_reply: Option<ReplyContent>,
}

/// A tapped button or list row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyContent {
    /// The id (payload) of the tapped option
    pub id: String,
    /// The title of the tapped option
    pub title: Option<String>,
}

/// Parse a raw webhook body into a normalized message.
///
/// Accepts the parsed JSON body of a webhook call; type mismatches during
/// deserialization and missing path segments alike surface as
/// [`Error::Validation`].
pub fn parse_webhook(payload: &serde_json::Value) -> Result<NormalizedMessage> {
    let webhook: WebhookPayload = serde_json::from_value(payload.clone())
        .map_err(|e| Error::Validation(format!("malformed body: {e}")))?;
    extract_message(&webhook)
}

/// Extract a normalized message from a typed webhook payload.
///
/// A single linear validate-then-extract pass over
/// `entry[0].changes[0].value.messages[0]`; every step either advances or
/// fails terminally.
pub fn extract_message(webhook: &WebhookPayload) -> Result<NormalizedMessage> {
    let entry = webhook
        .entry
        .first()
        .ok_or_else(|| Error::Validation("missing entry".to_string()))?;

    let change = entry
        .changes
        .first()
        .ok_or_else(|| Error::Validation("missing changes".to_string()))?;

    let value = change
        .value
        .as_ref()
        .ok_or_else(|| Error::Validation("missing value".to_string()))?;

    let message = value
        .messages
        .first()
        .ok_or_else(|| Error::Validation("missing messages".to_string()))?;

    let sender_id = message
        .from
        .as_ref()
        .ok_or_else(|| Error::Validation("missing sender".to_string()))?;

    let text = resolve_text(message)?;

    Ok(NormalizedMessage::new(sender_id, text))
}

/// Determine the message text by message type.
///
/// Text messages yield `text.body`; button and list replies yield the tapped
/// option's id. Any other type or shape fails.
fn resolve_text(message: &WebhookMessage) -> Result<String> {
    let message_type = message
        .message_type
        .as_deref()
        .ok_or_else(|| Error::Validation("missing message type".to_string()))?;

    match message_type {
        "text" => message
            .text
            .as_ref()
            .map(|t| t.body.clone())
            .ok_or_else(|| Error::Validation("missing text body".to_string())),
        "interactive" => {
            let interactive = message
                .interactive
                .as_ref()
                .ok_or_else(|| Error::Validation("missing interactive content".to_string()))?;

            match interactive.interactive_type.as_deref() {
                Some("button_reply") => interactive
                    .button_reply
                    .as_ref()
                    .map(|r| r.id.clone())
                    .ok_or_else(|| Error::Validation("missing button_reply".to_string())),
                Some("list_reply") => interactive
                    .list_reply
                    .as_ref()
                    .map(|r| r.id.clone())
                    .ok_or_else(|| Error::Validation("missing list_reply".to_string())),
                other => Err(Error::Validation(format!(
                    "unsupported interactive type: {}",
                    other.unwrap_or("<none>")
                ))),
            }
        }
        other => Err(Error::Validation(format!(
            "unsupported message type: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_with_message(message: serde_json::Value) -> serde_json::Value {
        json!({
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "BUSINESS_ID",
                "changes": [{
                    "field": "messages",
                    "value": { "messages": [message] }
                }]
            }]
        })
    }

    #[test]
    fn test_text_message_round_trip() {
        let payload = payload_with_message(json!({
            "from": "123",
            "type": "text",
            "text": { "body": "hi" }
        }));

        let msg = parse_webhook(&payload).unwrap();
        assert_eq!(msg.sender_id, "123");
        assert_eq!(msg.text, "hi");
        assert!(msg.metadata.is_empty());
    }

    #[test]
    fn test_button_reply_yields_id() {
        let payload = payload_with_message(json!({
            "from": "123",
            "type": "interactive",
            "interactive": {
                "type": "button_reply",
                "button_reply": { "id": "OPT_A", "title": "Option A" }
            }
        }));

        let msg = parse_webhook(&payload).unwrap();
        assert_eq!(msg.text, "OPT_A");
    }

    #[test]
    fn test_list_reply_yields_id() {
        let payload = payload_with_message(json!({
            "from": "123",
            "type": "interactive",
            "interactive": {
                "type": "list_reply",
                "list_reply": { "id": "OPT_B", "title": "Option B" }
            }
        }));

        let msg = parse_webhook(&payload).unwrap();
        assert_eq!(msg.text, "OPT_B");
    }

    #[test]
    fn test_empty_entry_fails() {
        let err = parse_webhook(&json!({ "entry": [] })).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("entry")));
    }

    #[test]
    fn test_missing_entry_field_fails() {
        let err = parse_webhook(&json!({ "object": "whatsapp_business_account" })).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("entry")));
    }

    #[test]
    fn test_empty_changes_fails() {
        let err = parse_webhook(&json!({ "entry": [{ "changes": [] }] })).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("changes")));
    }

    #[test]
    fn test_missing_value_fails() {
        let err = parse_webhook(&json!({ "entry": [{ "changes": [{ "field": "messages" }] }] }))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("value")));
    }

    #[test]
    fn test_empty_messages_fails() {
        let payload = json!({
            "entry": [{ "changes": [{ "value": { "messages": [] } }] }]
        });
        let err = parse_webhook(&payload).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("messages")));
    }

    #[test]
    fn test_missing_sender_fails() {
        let payload = payload_with_message(json!({
            "type": "text",
            "text": { "body": "hi" }
        }));
        let err = parse_webhook(&payload).unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("sender")));
    }

    #[test]
    fn test_text_type_without_body_fails() {
        let payload = payload_with_message(json!({
            "from": "123",
            "type": "text"
        }));
        assert!(parse_webhook(&payload).is_err());
    }

    #[test]
    fn test_unknown_interactive_type_fails() {
        let payload = payload_with_message(json!({
            "from": "123",
            "type": "interactive",
            "interactive": {
                "type": "nfm_reply",
                "nfm_reply": { "response_json": "{}" }
            }
        }));
        assert!(parse_webhook(&payload).is_err());
    }

    #[test]
    fn test_unsupported_message_type_fails() {
        // Media messages carry no resolvable text at this layer.
        let payload = payload_with_message(json!({
            "from": "123",
            "type": "image",
            "image": { "id": "MEDIA_ID" }
        }));
        assert!(parse_webhook(&payload).is_err());
    }

    #[test]
    fn test_non_object_payload_fails() {
        assert!(parse_webhook(&json!("not an object")).is_err());
        assert!(parse_webhook(&json!({ "entry": "not an array" })).is_err());
    }
}
