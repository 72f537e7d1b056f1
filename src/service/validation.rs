use regex::Regex;

use crate::service::price::{self, PriceRules};

pub const ASK_BHK_PROMPT: &str = "What BHK are you looking for? (e.g., 2BHK, 3 BHK)";
pub const INVALID_BHK_PROMPT: &str =
    "That doesn't seem like a valid BHK. Please tell me a number (e.g., 2BHK).";
pub const BHK_RANGE_PROMPT: &str =
    "Please provide a valid BHK number (e.g., 1, 2, 3, 4, 5, 6).";
pub const ASK_PRICE_PROMPT: &str = "What's your approximate budget?";
pub const INVALID_PRICE_PROMPT: &str =
    "Please provide a valid budget, for example '1.2 crore' or '90 lakhs'.";
pub const UNREALISTIC_PRICE_PROMPT: &str =
    "Please provide a realistic budget. Prices usually range from 10 lakhs to 50 crores.";
pub const ASK_LOCATION_PROMPT: &str =
    "Which area are you looking for? Please provide a locality name.";

pub const MIN_BHK: i64 = 1;
pub const MAX_BHK: i64 = 6;

/// Outcome of validating one raw slot value: a normalized value, or a
/// rejection carrying the re-prompt the dialogue manager should utter.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValidationResult<T> {
    Accepted(T),
    Rejected { prompt: String },
}

impl<T> SlotValidationResult<T> {
    fn rejected(prompt: &str) -> Self {
        SlotValidationResult::Rejected {
            prompt: prompt.to_string(),
        }
    }
}

/// Accepts a bedroom count iff the digits in the input parse to a value in
/// [1, 6]. Absent input, digit-free input, and out-of-range values each get
/// their own prompt.
pub fn validate_bhk(raw: Option<&str>) -> SlotValidationResult<i64> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return SlotValidationResult::rejected(ASK_BHK_PROMPT);
    };

    let Some(bhk) = extract_bhk(raw) else {
        return SlotValidationResult::rejected(INVALID_BHK_PROMPT);
    };

    if (MIN_BHK..=MAX_BHK).contains(&bhk) {
        SlotValidationResult::Accepted(bhk)
    } else {
        SlotValidationResult::rejected(BHK_RANGE_PROMPT)
    }
}

/// Accepts a budget iff it normalizes to the accepted lakh range. Digit-free
/// input and out-of-range values get distinct clarification prompts.
pub fn validate_price(raw: Option<&str>) -> SlotValidationResult<f64> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return SlotValidationResult::rejected(ASK_PRICE_PROMPT);
    };

    if price::extract_digits(raw).is_none() {
        return SlotValidationResult::rejected(INVALID_PRICE_PROMPT);
    }

    match price::normalize_price(raw, &PriceRules::default()) {
        Some(value) => SlotValidationResult::Accepted(value),
        None => SlotValidationResult::rejected(UNREALISTIC_PRICE_PROMPT),
    }
}

/// Accepts any locality name longer than two characters.
pub fn validate_location(raw: Option<&str>) -> SlotValidationResult<String> {
    match raw.map(str::trim).filter(|s| s.len() > 2) {
        Some(location) => SlotValidationResult::Accepted(location.to_string()),
        None => SlotValidationResult::rejected(ASK_LOCATION_PROMPT),
    }
}

/// Best-effort bedroom-count extraction from a free-form utterance. Joins
/// every digit in the text ("a 3 BHK please" -> 3); never fails.
pub fn extract_bhk(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}

/// Best-effort budget extraction from a free-form utterance: a number with a
/// unit word anywhere in the text, or a message that is nothing but a number.
pub fn extract_price(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
        return Some(trimmed.to_string());
    }

    let pattern = Regex::new(r"(?i)\d[\d.,]*\s*(?:crores?|lakhs?|lacs?)").ok()?;
    pattern.find(trimmed).map(|m| m.as_str().to_string())
}

/// Best-effort locality extraction: the trimmed utterance when it is
/// plausible free text.
pub fn extract_location(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.len() > 2 && trimmed.chars().any(|c| c.is_alphabetic()) {
        Some(trimmed.to_string())
    } else {
        None
    }
}
