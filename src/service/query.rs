/// Dynamic filter assembly for property searches.
///
/// Every user-supplied value travels as a bound placeholder; the predicate
/// text itself is built only from fixed clause fragments, so raw input can
/// never alter the query structure.

/// Fraction applied around a normalized budget to form the price band.
pub const PRICE_TOLERANCE: f64 = 0.10;

/// Derived property-type split: "villa" means the amenities text mentions a
/// villa, "apartment"/"flat" means it does not. There is no dedicated type
/// column; the amenities text is the only signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyType {
    Villa,
    Apartment,
}

impl PropertyType {
    pub fn parse(raw: &str) -> Option<PropertyType> {
        let lower = raw.to_lowercase();
        if lower.contains("villa") {
            Some(PropertyType::Villa)
        } else if lower.contains("apartment") || lower.contains("flat") {
            Some(PropertyType::Apartment)
        } else {
            None
        }
    }
}

/// The set of currently-known filters for one search. Every field is
/// independently optional; an absent field imposes no constraint. Built
/// fresh per search invocation, never persisted.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub property_id: Option<String>,
    pub location: Option<String>,
    pub bhk: Option<i64>,
    /// Normalized budget in lakhs; expanded to an inclusive ±10% band.
    pub price_lacs: Option<f64>,
    pub amenity: Option<String>,
    pub property_type: Option<PropertyType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Int(i64),
    Real(f64),
}

/// A ready-to-run predicate: SQL with `?` placeholders plus the values to
/// bind, in placeholder order.
#[derive(Debug, Clone)]
pub struct PropertyQuery {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

/// Assembles the conjunctive filter predicate, always anchored to
/// `status = 'Available'`. Clause order is stable: property_id, location,
/// bhk, price band, amenity, property type.
pub fn build_query(criteria: &SearchCriteria) -> PropertyQuery {
    let mut sql = String::from(
        "SELECT property_id, location, bhk, price_lacs, amenities, status, \
         contact_person, contact_number FROM properties WHERE status = 'Available'",
    );
    let mut params: Vec<QueryParam> = Vec::new();

    if let Some(property_id) = &criteria.property_id {
        sql.push_str(" AND property_id = ?");
        params.push(QueryParam::Text(property_id.to_uppercase()));
    }

    if let Some(location) = &criteria.location {
        sql.push_str(" AND location LIKE ?");
        params.push(QueryParam::Text(format!("%{}%", location)));
    }

    if let Some(bhk) = criteria.bhk {
        sql.push_str(" AND bhk = ?");
        params.push(QueryParam::Int(bhk));
    }

    if let Some(price) = criteria.price_lacs {
        sql.push_str(" AND price_lacs BETWEEN ? AND ?");
        params.push(QueryParam::Real(price * (1.0 - PRICE_TOLERANCE)));
        params.push(QueryParam::Real(price * (1.0 + PRICE_TOLERANCE)));
    }

    if let Some(amenity) = &criteria.amenity {
        sql.push_str(" AND amenities LIKE ?");
        params.push(QueryParam::Text(format!("%{}%", amenity)));
    }

    match criteria.property_type {
        Some(PropertyType::Villa) => {
            sql.push_str(" AND amenities LIKE ?");
            params.push(QueryParam::Text("%villa%".to_string()));
        }
        Some(PropertyType::Apartment) => {
            sql.push_str(" AND amenities NOT LIKE ?");
            params.push(QueryParam::Text("%villa%".to_string()));
        }
        None => {}
    }

    PropertyQuery { sql, params }
}
