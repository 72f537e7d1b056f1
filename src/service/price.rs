/// Price-unit normalization for free-form budget expressions.
///
/// All prices in the store are quoted in lakhs (1 crore = 100 lakhs). Users
/// mix unit conventions freely ("1.5 crore", "90 lakhs", "120"), so a fixed
/// rule order converts whatever they said into the canonical scale.

pub const LACS_PER_CRORE: f64 = 100.0;

/// Unit keywords and thresholds for [`normalize_price`], passed explicitly so
/// the heuristic stays a pure function.
#[derive(Debug, Clone)]
pub struct PriceRules {
    pub crore_keywords: Vec<&'static str>,
    pub lakh_keywords: Vec<&'static str>,
    /// Bare numbers below this are read as crores ("5" means 5 Cr).
    pub bare_crore_below: f64,
    pub min_lacs: f64,
    pub max_lacs: f64,
}

impl Default for PriceRules {
    fn default() -> Self {
        PriceRules {
            crore_keywords: vec!["crore"],
            lakh_keywords: vec!["lakh", "lac"],
            bare_crore_below: 10.0,
            min_lacs: 10.0,
            max_lacs: 5000.0,
        }
    }
}

/// Joins every ASCII digit in the input and parses the result. Decimal points
/// are dropped, not treated as separators ("1.5" becomes 15); this mirrors
/// the historical extractor.
pub fn extract_digits(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Converts a budget expression to lakhs, or `None` when no number can be
/// extracted or the result falls outside the accepted range.
///
/// Rules, in order: a crore keyword multiplies by 100; a lakh keyword leaves
/// the magnitude unchanged; a bare number below the crore threshold is read
/// as crores, otherwise as already-lakhs.
pub fn normalize_price(raw: &str, rules: &PriceRules) -> Option<f64> {
    let text = raw.to_lowercase();
    let magnitude = extract_digits(&text)?;

    let value = if rules.crore_keywords.iter().any(|k| text.contains(k)) {
        magnitude * LACS_PER_CRORE
    } else if rules.lakh_keywords.iter().any(|k| text.contains(k)) {
        magnitude
    } else if magnitude < rules.bare_crore_below {
        magnitude * LACS_PER_CRORE
    } else {
        magnitude
    };

    (value >= rules.min_lacs && value <= rules.max_lacs).then_some(value)
}
