use std::sync::Arc;

use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::{
    db::DBClient,
    dtos::actiondtos::{ActionRequest, ActionResponse, BotResponse, SlotEvent, Tracker},
    error::HttpError,
    service::{
        price::{normalize_price, PriceRules},
        query::{PropertyType, SearchCriteria},
        search::{format_results, run_search, SearchOutcome, NO_RESULTS_MESSAGE},
        validation::{
            extract_bhk, extract_location, extract_price, validate_bhk, validate_location,
            validate_price, SlotValidationResult,
        },
    },
    AppState,
};

pub const ACTION_SEARCH_PROPERTIES: &str = "action_search_properties";
pub const ACTION_VALIDATE_FORM: &str = "validate_property_form";

/// Every slot the search consumes, in reset order.
pub const SEARCH_SLOTS: [&str; 6] = [
    "location",
    "bhk",
    "price",
    "property_id",
    "amenity",
    "property_type",
];

pub async fn action_webhook(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ActionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    if body.next_action.trim().is_empty() {
        return Err(HttpError::bad_request("next_action is required"));
    }

    let response = dispatch(&app_state.db_client, &body).await;
    Ok(Json(response))
}

pub async fn dispatch(db: &DBClient, request: &ActionRequest) -> ActionResponse {
    match request.next_action.as_str() {
        ACTION_SEARCH_PROPERTIES => search_action(db, &request.tracker).await,
        ACTION_VALIDATE_FORM => validate_form_action(&request.tracker),
        other => {
            tracing::warn!(action = other, "unknown action requested");
            ActionResponse::default()
        }
    }
}

/// Runs the property search over the currently-known slots. On success and
/// on an empty result the six search slots are reset so the next search
/// starts unconstrained; on an infrastructure failure they are left in
/// place so the same criteria can be retried.
pub async fn search_action(db: &DBClient, tracker: &Tracker) -> ActionResponse {
    let criteria = criteria_from_tracker(tracker);

    match run_search(db, &criteria).await {
        SearchOutcome::Results(rows) => ActionResponse {
            events: reset_slot_events(),
            responses: vec![BotResponse::new(format_results(&rows))],
        },
        SearchOutcome::Empty => ActionResponse {
            events: reset_slot_events(),
            responses: vec![BotResponse::new(NO_RESULTS_MESSAGE)],
        },
        SearchOutcome::InfrastructureFailure(apology) => ActionResponse {
            events: Vec::new(),
            responses: vec![BotResponse::new(apology)],
        },
    }
}

fn reset_slot_events() -> Vec<SlotEvent> {
    SEARCH_SLOTS.iter().map(|slot| SlotEvent::reset(slot)).collect()
}

fn criteria_from_tracker(tracker: &Tracker) -> SearchCriteria {
    let mut criteria = SearchCriteria {
        property_id: tracker.slot_text("property_id"),
        location: tracker.slot_text("location"),
        amenity: tracker.slot_text("amenity"),
        ..Default::default()
    };

    if let Some(raw) = tracker.slot_text("bhk") {
        match extract_bhk(&raw) {
            Some(bhk) => criteria.bhk = Some(bhk),
            None => tracing::debug!(raw = %raw, "could not parse bhk slot"),
        }
    }

    if let Some(raw) = tracker.slot_text("price") {
        // A slot filled through form validation is already a number in
        // lakhs; anything else goes through unit normalization.
        criteria.price_lacs = raw
            .trim()
            .parse::<f64>()
            .ok()
            .or_else(|| normalize_price(&raw, &PriceRules::default()));
        if criteria.price_lacs.is_none() {
            tracing::debug!(raw = %raw, "could not parse price slot");
        }
    }

    if let Some(raw) = tracker.slot_text("property_type") {
        criteria.property_type = PropertyType::parse(&raw);
    }

    criteria
}

/// Per-turn form validation: for each of bhk, price, and location, take the
/// slot value when the dialogue manager filled one, fall back to best-effort
/// extraction from the latest utterance when that slot is the one being
/// asked for, and validate the candidate. Rejections null the slot and add
/// the re-prompt.
pub fn validate_form_action(tracker: &Tracker) -> ActionResponse {
    let mut response = ActionResponse::default();
    let text = tracker.latest_message.text.as_deref().unwrap_or("");
    let requested = tracker.slot_text("requested_slot");
    let requested = requested.as_deref();

    let bhk_raw = tracker.slot_text("bhk").or_else(|| {
        (requested == Some("bhk"))
            .then(|| extract_bhk(text).map(|n| n.to_string()))
            .flatten()
    });
    if bhk_raw.is_some() || requested == Some("bhk") {
        match validate_bhk(bhk_raw.as_deref()) {
            SlotValidationResult::Accepted(bhk) => {
                response.events.push(SlotEvent::set("bhk", json!(bhk)));
            }
            SlotValidationResult::Rejected { prompt } => {
                response.events.push(SlotEvent::reset("bhk"));
                response.responses.push(BotResponse::new(prompt));
            }
        }
    }

    let price_raw = tracker.slot_text("price").or_else(|| {
        (requested == Some("price"))
            .then(|| extract_price(text))
            .flatten()
    });
    if price_raw.is_some() || requested == Some("price") {
        match validate_price(price_raw.as_deref()) {
            SlotValidationResult::Accepted(price) => {
                response.events.push(SlotEvent::set("price", json!(price)));
            }
            SlotValidationResult::Rejected { prompt } => {
                response.events.push(SlotEvent::reset("price"));
                response.responses.push(BotResponse::new(prompt));
            }
        }
    }

    let location_raw = tracker.slot_text("location").or_else(|| {
        (requested == Some("location"))
            .then(|| extract_location(text))
            .flatten()
    });
    if location_raw.is_some() || requested == Some("location") {
        match validate_location(location_raw.as_deref()) {
            SlotValidationResult::Accepted(location) => {
                response
                    .events
                    .push(SlotEvent::set("location", json!(location)));
            }
            SlotValidationResult::Rejected { prompt } => {
                response.events.push(SlotEvent::reset("location"));
                response.responses.push(BotResponse::new(prompt));
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{propertydb::PropertyExt, seed},
        dtos::actiondtos::LatestMessage,
        models::propertymodel::PropertyRecord,
        service::search::STORE_APOLOGY,
    };
    use serde_json::Value;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::collections::HashMap;

    async fn seeded_client() -> DBClient {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        seed::ensure_schema(&pool).await.expect("schema");
        let db = DBClient::new(pool);
        db.insert_property(&PropertyRecord {
            property_id: "P001".to_string(),
            location: "Koramangala".to_string(),
            bhk: 3,
            price_lacs: 145.0,
            amenities: "Gym, Swimming Pool".to_string(),
            status: "Available".to_string(),
            contact_person: "Ravi Kumar".to_string(),
            contact_number: "+91-9876543210".to_string(),
        })
        .await
        .expect("seed row");
        db
    }

    fn tracker(slots: &[(&str, Value)], text: Option<&str>) -> Tracker {
        Tracker {
            sender_id: "user-1".to_string(),
            slots: slots
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<HashMap<_, _>>(),
            latest_message: LatestMessage {
                text: text.map(str::to_string),
            },
        }
    }

    fn assert_all_slots_reset(events: &[SlotEvent]) {
        assert_eq!(events.len(), SEARCH_SLOTS.len());
        for slot in SEARCH_SLOTS {
            assert!(
                events.contains(&SlotEvent::reset(slot)),
                "missing reset for {slot}"
            );
        }
    }

    #[tokio::test]
    async fn test_search_action_formats_results_and_resets_slots() {
        let db = seeded_client().await;
        let tracker = tracker(
            &[("location", json!("Koramangala")), ("bhk", json!("3BHK"))],
            None,
        );

        let response = search_action(&db, &tracker).await;
        assert_eq!(response.responses.len(), 1);
        assert!(response.responses[0].text.contains("P001"));
        assert!(response.responses[0]
            .text
            .starts_with("Here are some properties"));
        assert_all_slots_reset(&response.events);
    }

    #[tokio::test]
    async fn test_search_action_empty_result_still_resets_slots() {
        let db = seeded_client().await;
        let tracker = tracker(&[("location", json!("Mysore Road"))], None);

        let response = search_action(&db, &tracker).await;
        assert_eq!(
            response.responses,
            vec![BotResponse::new(NO_RESULTS_MESSAGE)]
        );
        assert_all_slots_reset(&response.events);
    }

    #[tokio::test]
    async fn test_search_action_failure_keeps_slots() {
        let db = seeded_client().await;
        db.pool().close().await;
        let tracker = tracker(&[("location", json!("Koramangala"))], None);

        let response = search_action(&db, &tracker).await;
        assert_eq!(response.responses, vec![BotResponse::new(STORE_APOLOGY)]);
        assert!(response.events.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_action_answers_with_nothing() {
        let db = seeded_client().await;
        let request = ActionRequest {
            next_action: "action_make_coffee".to_string(),
            sender_id: None,
            tracker: tracker(&[], None),
        };

        assert_eq!(dispatch(&db, &request).await, ActionResponse::default());
    }

    #[test]
    fn test_criteria_from_tracker_parses_slot_shapes() {
        let tracker = tracker(
            &[
                ("property_id", json!("prop7")),
                ("bhk", json!("2 BHK")),
                ("price", json!("1.2 crore")),
                ("property_type", json!("a villa please")),
            ],
            None,
        );

        let criteria = criteria_from_tracker(&tracker);
        assert_eq!(criteria.property_id, Some("prop7".to_string()));
        assert_eq!(criteria.bhk, Some(2));
        assert_eq!(criteria.price_lacs, Some(1200.0));
        assert_eq!(criteria.property_type, Some(PropertyType::Villa));
        assert_eq!(criteria.location, None);
    }

    #[test]
    fn test_validate_form_accepts_filled_slots() {
        let tracker = tracker(&[("bhk", json!("3")), ("location", json!("Koramangala"))], None);

        let response = validate_form_action(&tracker);
        assert!(response
            .events
            .contains(&SlotEvent::set("bhk", json!(3))));
        assert!(response
            .events
            .contains(&SlotEvent::set("location", json!("Koramangala"))));
        assert!(response.responses.is_empty());
    }

    #[test]
    fn test_validate_form_rejects_with_prompt_and_nulls_slot() {
        let tracker = tracker(&[("bhk", json!("9BHK"))], None);

        let response = validate_form_action(&tracker);
        assert_eq!(response.events, vec![SlotEvent::reset("bhk")]);
        assert_eq!(response.responses.len(), 1);
        assert!(response.responses[0].text.contains("valid BHK number"));
    }

    #[test]
    fn test_validate_form_extracts_requested_slot_from_utterance() {
        let tracker = tracker(
            &[("requested_slot", json!("price"))],
            Some("somewhere around 90 lakhs"),
        );

        let response = validate_form_action(&tracker);
        assert_eq!(
            response.events,
            vec![SlotEvent::set("price", json!(90.0))]
        );
        assert!(response.responses.is_empty());
    }

    #[test]
    fn test_validate_form_asks_when_requested_slot_is_missing() {
        let tracker = tracker(&[("requested_slot", json!("bhk"))], Some("whatever you have"));

        let response = validate_form_action(&tracker);
        assert_eq!(response.events, vec![SlotEvent::reset("bhk")]);
        assert_eq!(response.responses.len(), 1);
        assert!(response.responses[0].text.contains("What BHK"));
    }

    #[test]
    fn test_validate_form_ignores_untouched_slots() {
        let response = validate_form_action(&tracker(&[], Some("hello there")));
        assert_eq!(response, ActionResponse::default());
    }
}
