use crate::{
    db::{propertydb::PropertyExt, DBClient},
    models::propertymodel::PropertyRecord,
    service::query::{build_query, SearchCriteria},
};

pub const RESULTS_HEADER: &str = "Here are some properties matching your criteria:\n";
pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, I couldn't find any properties matching your criteria. \
     Would you like to try a different search?";
pub const STORE_APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting to the property database right now.";

/// Outcome of one search. An empty result set is a valid outcome, distinct
/// from an infrastructure failure; the failure variant carries only the
/// user-safe apology, never the underlying cause.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<PropertyRecord>),
    Empty,
    InfrastructureFailure(String),
}

/// Builds the predicate for the given criteria and runs it against the
/// store. Store errors are logged with full detail and surfaced as an
/// apology; they never reach the user verbatim.
pub async fn run_search(db: &DBClient, criteria: &SearchCriteria) -> SearchOutcome {
    let query = build_query(criteria);
    tracing::debug!(sql = %query.sql, params = ?query.params, "executing property search");

    match db.search_properties(&query).await {
        Ok(rows) if rows.is_empty() => SearchOutcome::Empty,
        Ok(rows) => SearchOutcome::Results(rows),
        Err(err) => {
            tracing::error!(error = %err, "property search failed");
            SearchOutcome::InfrastructureFailure(STORE_APOLOGY.to_string())
        }
    }
}

/// One deterministic summary line per record, preserving row order.
pub fn format_results(rows: &[PropertyRecord]) -> String {
    let mut response = String::from(RESULTS_HEADER);
    for row in rows {
        response.push_str(&format!(
            "- Property ID: {}, Location: {}, BHK: {}, Price: {} Lakhs, Amenities: {}.\n",
            row.property_id, row.location, row.bhk, row.price_lacs, row.amenities
        ));
    }
    response
}
