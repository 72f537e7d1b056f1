use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Only listings in this status are searchable.
pub const STATUS_AVAILABLE: &str = "Available";

/// One sellable unit as persisted in the `properties` relation.
///
/// `property_id` is case-normalized to upper-case and `price_lacs` is always
/// quoted in lakhs. The core treats rows as read-only outside of seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PropertyRecord {
    pub property_id: String,
    pub location: String,
    pub bhk: i64,
    pub price_lacs: f64,
    pub amenities: String,
    pub status: String,
    pub contact_person: String,
    pub contact_number: String,
}

impl PropertyRecord {
    pub fn is_available(&self) -> bool {
        self.status == STATUS_AVAILABLE
    }
}
