//! Outbound wire-message shapes for the WhatsApp Cloud API
//!
//! These structs mirror the Cloud API JSON exactly; they are the on-the-wire
//! contract, not freely designed. [`prepare_message`] is the pure conversion
//! from a (recipient, text, buttons) tuple to one of the three shapes.

use serde::Serialize;

use crate::message::Button;

/// The `messaging_product` value for all Cloud API messages
const MESSAGING_PRODUCT: &str = "whatsapp";

/// WhatsApp allows at most three reply buttons per interactive message
const MAX_REPLY_BUTTONS: usize = 3;

/// WhatsApp allows at most ten rows per list section
const MAX_LIST_ROWS: usize = 10;

/// Reply button titles are capped at 20 characters
const REPLY_TITLE_LIMIT: usize = 20;

/// List row titles are capped at 24 characters
const ROW_TITLE_LIMIT: usize = 24;

/// Fixed label used for the list section title and the list opener button
const LIST_LABEL: &str = "Select";

/// A message in one of the three Cloud API wire shapes.
///
/// Serializes untagged: each variant already carries the exact field layout
/// the API expects.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WireMessage {
    /// Plain text message
    Text(TextMessage),
    /// Interactive message with up to three reply buttons
    Buttons(ButtonMessage),
    /// Interactive list message with up to ten rows
    List(ListMessage),
}

/// Plain text message: `{messaging_product, to, text: {body}}`
#[derive(Debug, Clone, Serialize)]
pub struct TextMessage {
    /// Always `"whatsapp"`
    pub messaging_product: &'static str,
    /// Recipient identifier
    pub to: String,
    /// Message body
    pub text: TextBody,
}

/// Text body wrapper
#[derive(Debug, Clone, Serialize)]
pub struct TextBody {
    /// The text itself (never truncated)
    pub body: String,
}

/// Interactive button message
#[derive(Debug, Clone, Serialize)]
pub struct ButtonMessage {
    /// Always `"whatsapp"`
    pub messaging_product: &'static str,
    /// Recipient identifier
    pub to: String,
    /// Always `"interactive"`
    #[serde(rename = "type")]
    pub message_type: &'static str,
    /// Interactive payload
    pub interactive: ButtonInteractive,
}

/// Button-flavored interactive payload
#[derive(Debug, Clone, Serialize)]
pub struct ButtonInteractive {
    /// Always `"button"`
    #[serde(rename = "type")]
    pub interactive_type: &'static str,
    /// Message body shown above the buttons
    pub body: TextBody,
    /// Button action
    pub action: ButtonAction,
}

/// Action holding the reply buttons
#[derive(Debug, Clone, Serialize)]
pub struct ButtonAction {
    /// Up to three reply buttons
    pub buttons: Vec<ReplyButton>,
}

/// A single reply button
#[derive(Debug, Clone, Serialize)]
pub struct ReplyButton {
    /// Always `"reply"`
    #[serde(rename = "type")]
    pub button_type: &'static str,
    /// Button id and title
    pub reply: ReplyTarget,
}

/// Reply button id and title
#[derive(Debug, Clone, Serialize)]
pub struct ReplyTarget {
    /// Opaque action identifier (the button payload)
    pub id: String,
    /// Button label, truncated to 20 characters
    pub title: String,
}

/// Interactive list message
#[derive(Debug, Clone, Serialize)]
pub struct ListMessage {
    /// Always `"whatsapp"`
    pub messaging_product: &'static str,
    /// Recipient identifier
    pub to: String,
    /// Always `"interactive"`
    #[serde(rename = "type")]
    pub message_type: &'static str,
    /// Interactive payload
    pub interactive: ListInteractive,
}

/// List-flavored interactive payload
#[derive(Debug, Clone, Serialize)]
pub struct ListInteractive {
    /// Always `"list"`
    #[serde(rename = "type")]
    pub interactive_type: &'static str,
    /// Message body shown above the list
    pub body: TextBody,
    /// List action
    pub action: ListAction,
}

/// Action holding the list opener button and sections
#[derive(Debug, Clone, Serialize)]
pub struct ListAction {
    /// Label of the button that opens the list
    pub button: String,
    /// A single section holding all rows
    pub sections: Vec<ListSection>,
}

/// A section of list rows
#[derive(Debug, Clone, Serialize)]
pub struct ListSection {
    /// Section title (same fixed label as the opener button)
    pub title: String,
    /// Up to ten rows
    pub rows: Vec<ListRow>,
}

/// A single list row
#[derive(Debug, Clone, Serialize)]
pub struct ListRow {
    /// Opaque action identifier (the button payload)
    pub id: String,
    /// Row label, truncated to 24 characters
    pub title: String,
}

/// Convert a reply into the wire shape the Cloud API expects.
///
/// Routing rule: no buttons → plain text; a present button list of up to
/// three → reply buttons; more than three → list. An empty-but-present
/// button list still takes the button path (zero reply buttons) — presence
/// of the argument, not its length, selects the interactive path.
///
/// Pure and infallible: oversized button lists and overlong titles are
/// silently truncated, never rejected.
#[must_use]
pub fn prepare_message(to: &str, text: &str, buttons: Option<&[Button]>) -> WireMessage {
    match buttons {
        None => text_message(to, text),
        Some(buttons) if buttons.len() <= MAX_REPLY_BUTTONS => button_message(to, text, buttons),
        Some(buttons) => list_message(to, text, buttons),
    }
}

fn text_message(to: &str, text: &str) -> WireMessage {
    WireMessage::Text(TextMessage {
        messaging_product: MESSAGING_PRODUCT,
        to: to.to_string(),
        text: TextBody {
            body: text.to_string(),
        },
    })
}

fn button_message(to: &str, text: &str, buttons: &[Button]) -> WireMessage {
    let buttons = buttons
        .iter()
        .take(MAX_REPLY_BUTTONS)
        .map(|b| ReplyButton {
            button_type: "reply",
            reply: ReplyTarget {
                id: b.payload.clone(),
                title: truncate_title(&b.title, REPLY_TITLE_LIMIT),
            },
        })
        .collect();

    WireMessage::Buttons(ButtonMessage {
        messaging_product: MESSAGING_PRODUCT,
        to: to.to_string(),
        message_type: "interactive",
        interactive: ButtonInteractive {
            interactive_type: "button",
            body: TextBody {
                body: text.to_string(),
            },
            action: ButtonAction { buttons },
        },
    })
}

fn list_message(to: &str, text: &str, buttons: &[Button]) -> WireMessage {
    let rows = buttons
        .iter()
        .take(MAX_LIST_ROWS)
        .map(|b| ListRow {
            id: b.payload.clone(),
            title: truncate_title(&b.title, ROW_TITLE_LIMIT),
        })
        .collect();

    WireMessage::List(ListMessage {
        messaging_product: MESSAGING_PRODUCT,
        to: to.to_string(),
        message_type: "interactive",
        interactive: ListInteractive {
            interactive_type: "list",
            body: TextBody {
                body: text.to_string(),
            },
            action: ListAction {
                button: LIST_LABEL.to_string(),
                sections: vec![ListSection {
                    title: LIST_LABEL.to_string(),
                    rows,
                }],
            },
        },
    })
}

/// Truncate a title to `limit` characters (char-wise, safe for multibyte)
fn truncate_title(title: &str, limit: usize) -> String {
    title.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buttons(n: usize) -> Vec<Button> {
        (0..n)
            .map(|i| Button::new(format!("Option {i}"), format!("OPT_{i}")))
            .collect()
    }

    #[test]
    fn test_text_message_shape() {
        let wire = prepare_message("15551234567", "Hello there", None);
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(
            value,
            json!({
                "messaging_product": "whatsapp",
                "to": "15551234567",
                "text": { "body": "Hello there" }
            })
        );
    }

    #[test]
    fn test_text_body_never_truncated() {
        let long = "x".repeat(500);
        let wire = prepare_message("1", &long, None);
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["text"]["body"].as_str().unwrap().len(), 500);
    }

    #[test]
    fn test_button_message_shape() {
        let wire = prepare_message("1", "Pick one", Some(&buttons(2)));
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(
            value,
            json!({
                "messaging_product": "whatsapp",
                "to": "1",
                "type": "interactive",
                "interactive": {
                    "type": "button",
                    "body": { "text": "Pick one" },
                    "action": {
                        "buttons": [
                            { "type": "reply", "reply": { "id": "OPT_0", "title": "Option 0" } },
                            { "type": "reply", "reply": { "id": "OPT_1", "title": "Option 1" } }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_up_to_three_buttons_take_button_path() {
        for n in 0..=3 {
            let wire = prepare_message("1", "Pick", Some(&buttons(n)));
            let value = serde_json::to_value(&wire).unwrap();
            assert_eq!(value["interactive"]["type"], "button", "count {n}");
            assert_eq!(
                value["interactive"]["action"]["buttons"]
                    .as_array()
                    .unwrap()
                    .len(),
                n
            );
        }
    }

    #[test]
    fn test_empty_button_list_is_still_interactive() {
        // Some(vec![]) routes to the button shape with zero buttons, not to
        // plain text.
        let wire = prepare_message("1", "Pick", Some(&[]));
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["type"], "interactive");
        assert_eq!(value["interactive"]["action"]["buttons"], json!([]));
    }

    #[test]
    fn test_button_title_truncated_to_20_chars() {
        let long = vec![Button::new("This title is definitely too long", "ID")];
        let wire = prepare_message("1", "Pick", Some(&long));
        let value = serde_json::to_value(&wire).unwrap();
        let title = value["interactive"]["action"]["buttons"][0]["reply"]["title"]
            .as_str()
            .unwrap();
        assert_eq!(title, "This title is defini");
        assert_eq!(title.chars().count(), 20);
    }

    #[test]
    fn test_four_buttons_take_list_path() {
        let wire = prepare_message("1", "Pick one", Some(&buttons(4)));
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(value["type"], "interactive");
        assert_eq!(value["interactive"]["type"], "list");
        assert_eq!(value["interactive"]["body"]["text"], "Pick one");
        assert_eq!(value["interactive"]["action"]["button"], "Select");

        let sections = value["interactive"]["action"]["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0]["title"], "Select");

        let rows = sections[0]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], json!({ "id": "OPT_0", "title": "Option 0" }));
    }

    #[test]
    fn test_list_capped_at_ten_rows() {
        let wire = prepare_message("1", "Pick", Some(&buttons(15)));
        let value = serde_json::to_value(&wire).unwrap();
        let rows = value["interactive"]["action"]["sections"][0]["rows"]
            .as_array()
            .unwrap();
        assert_eq!(rows.len(), 10);
        // First ten, in order
        assert_eq!(rows[9]["id"], "OPT_9");
    }

    #[test]
    fn test_list_row_title_truncated_to_24_chars() {
        let long: Vec<Button> = (0..4)
            .map(|i| Button::new("An extremely verbose row title", format!("R{i}")))
            .collect();
        let wire = prepare_message("1", "Pick", Some(&long));
        let value = serde_json::to_value(&wire).unwrap();
        let title = value["interactive"]["action"]["sections"][0]["rows"][0]["title"]
            .as_str()
            .unwrap();
        assert_eq!(title, "An extremely verbose row");
        assert_eq!(title.chars().count(), 24);
    }

    #[test]
    fn test_truncate_title_multibyte() {
        // Char-wise truncation must not split multibyte sequences.
        assert_eq!(truncate_title("안녕하세요 반갑습니다", 5), "안녕하세요");
        assert_eq!(truncate_title("short", 20), "short");
    }
}
