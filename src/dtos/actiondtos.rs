use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One turn's request from the dialogue manager: which action to run, plus
/// the tracker with the currently-known slots and the latest utterance.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
}

impl Tracker {
    /// The slot value as text, when it carries one. Numbers are rendered so
    /// pre-normalized values survive the round trip; null, empty strings,
    /// and anything else count as absent.
    pub fn slot_text(&self, name: &str) -> Option<String> {
        match self.slots.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
}

/// A `SlotSet` event in the dialogue manager's event stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotEvent {
    pub event: String,
    pub name: String,
    pub value: Value,
}

impl SlotEvent {
    pub fn set(name: &str, value: Value) -> Self {
        SlotEvent {
            event: "slot".to_string(),
            name: name.to_string(),
            value,
        }
    }

    pub fn reset(name: &str) -> Self {
        SlotEvent::set(name, Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotResponse {
    pub text: String,
}

impl BotResponse {
    pub fn new(text: impl Into<String>) -> Self {
        BotResponse { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionResponse {
    pub events: Vec<SlotEvent>,
    pub responses: Vec<BotResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_request_parses_a_dialogue_manager_payload() {
        let payload = json!({
            "next_action": "action_search_properties",
            "sender_id": "user-42",
            "tracker": {
                "sender_id": "user-42",
                "slots": {
                    "location": "Koramangala",
                    "bhk": "3BHK",
                    "price": 120.0,
                    "property_id": null
                },
                "latest_message": { "text": "show me what you have" }
            }
        });

        let request: ActionRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(request.next_action, "action_search_properties");
        assert_eq!(
            request.tracker.slot_text("location"),
            Some("Koramangala".to_string())
        );
        assert_eq!(request.tracker.slot_text("price"), Some("120.0".to_string()));
        assert_eq!(request.tracker.slot_text("property_id"), None);
        assert_eq!(request.tracker.slot_text("amenity"), None);
        assert_eq!(
            request.tracker.latest_message.text.as_deref(),
            Some("show me what you have")
        );
    }

    #[test]
    fn test_slot_events_serialize_in_the_event_stream_shape() {
        let event = SlotEvent::set("bhk", json!(3));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "event": "slot", "name": "bhk", "value": 3 })
        );
        assert_eq!(
            serde_json::to_value(SlotEvent::reset("price")).unwrap(),
            json!({ "event": "slot", "name": "price", "value": null })
        );
    }
}
