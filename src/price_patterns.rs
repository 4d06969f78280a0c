//! # Price Patterns Module
//!
//! This module contains the regex patterns and constants used for price and
//! unit detection in dictated ingredient lists. Patterns are compiled once and
//! shared read-only.

use lazy_static::lazy_static;
use regex::Regex;

/// A price amount, dot or German decimal comma
pub const NUMBER: &str = r"\d+(?:[.,]\d+)?";

// Alternatives are ordered longest first so the trailing word boundary picks the full word
pub const WEIGHT_UNITS: &str = "kilogramms|kilogramm|kilogrammes|kilogramme|kilograms|kilogram|kilos|kilo|kgs|kg|gramms|gramm|grammes|gramme|grams|gram|grm|gr|g";
pub const VOLUME_UNITS: &str =
    "milliliters|milliliter|millilitres|millilitre|ml|liters|liter|litres|litre|ltr|l";
pub const PIECE_UNITS: &str = "stücke|stück|stueck|stk|pieces|piece|pcs|pc";

/// Prepositions that introduce a unit ("pro kg") or a price ("für 3")
pub const PREPOSITIONS: &str = "pro|per|je|für";

fn all_units() -> String {
    format!("{WEIGHT_UNITS}|{VOLUME_UNITS}|{PIECE_UNITS}")
}

/// "<number> Euro|EUR|€", optionally followed by "pro <unit>"
pub fn amount_with_currency_pattern() -> String {
    format!(
        r"(?i)\b({NUMBER})\s*(?:euros?\b|eur\b|€)(?:\s*(?:pro|per|je|/)\s*({units})\b)?",
        units = all_units()
    )
}

/// "€<number>"
pub fn currency_prefix_pattern() -> String {
    format!(r"(?i)€\s*({NUMBER})")
}

/// "<number> pro|per|je|für <unit>"
pub fn amount_per_unit_pattern() -> String {
    format!(
        r"(?i)\b({NUMBER})\s*(?:{PREPOSITIONS}|/)\s*({units})\b",
        units = all_units()
    )
}

/// Decimal amount directly followed by a unit, e.g. "2,50 kg"; integers before
/// a unit ("500 g") stay quantities
pub fn decimal_with_unit_pattern() -> String {
    format!(r"(?i)\b(\d+[.,]\d+)\s*({units})\b", units = all_units())
}

/// "für|pro|je <number>"
pub fn prepositional_amount_pattern() -> String {
    format!(r"(?i)\b(?:für|pro|je)\s+({NUMBER})\b")
}

/// Bare decimal with a fractional part, e.g. "1.20" or "2,50"
pub const BARE_DECIMAL_PATTERN: &str = r"\b(\d+[.,]\d{1,2})\b";

/// "pro kg", "/l"
pub fn unit_after_preposition_pattern(units: &str) -> String {
    format!(r"(?i)(?:\b(?:{PREPOSITIONS})\s+|/\s*)({units})\b")
}

/// "500 g", "1,5kg"
pub fn unit_after_quantity_pattern(units: &str) -> String {
    format!(r"(?i)\b{NUMBER}\s*({units})\b")
}

lazy_static! {
    pub static ref AMOUNT_WITH_CURRENCY_REGEX: Regex = Regex::new(&amount_with_currency_pattern())
        .expect("Currency price pattern should be valid");
    pub static ref CURRENCY_PREFIX_REGEX: Regex = Regex::new(&currency_prefix_pattern())
        .expect("Currency prefix pattern should be valid");
    pub static ref AMOUNT_PER_UNIT_REGEX: Regex = Regex::new(&amount_per_unit_pattern())
        .expect("Per-unit price pattern should be valid");
    pub static ref DECIMAL_WITH_UNIT_REGEX: Regex = Regex::new(&decimal_with_unit_pattern())
        .expect("Decimal unit price pattern should be valid");
    pub static ref PREPOSITIONAL_AMOUNT_REGEX: Regex =
        Regex::new(&prepositional_amount_pattern())
            .expect("Prepositional price pattern should be valid");
    pub static ref BARE_DECIMAL_REGEX: Regex =
        Regex::new(BARE_DECIMAL_PATTERN).expect("Bare decimal pattern should be valid");

    /// Matches when a remainder of text starts with a unit word
    pub static ref LEADING_UNIT_REGEX: Regex =
        Regex::new(&format!(r"(?i)^\s*(?:{})\b", all_units()))
            .expect("Leading unit pattern should be valid");

    pub static ref WEIGHT_PREPOSITION_REGEX: Regex =
        Regex::new(&unit_after_preposition_pattern(WEIGHT_UNITS))
            .expect("Weight unit pattern should be valid");
    pub static ref WEIGHT_QUANTITY_REGEX: Regex =
        Regex::new(&unit_after_quantity_pattern(WEIGHT_UNITS))
            .expect("Weight unit pattern should be valid");
    pub static ref VOLUME_PREPOSITION_REGEX: Regex =
        Regex::new(&unit_after_preposition_pattern(VOLUME_UNITS))
            .expect("Volume unit pattern should be valid");
    pub static ref VOLUME_QUANTITY_REGEX: Regex =
        Regex::new(&unit_after_quantity_pattern(VOLUME_UNITS))
            .expect("Volume unit pattern should be valid");
    pub static ref PIECE_PREPOSITION_REGEX: Regex =
        Regex::new(&unit_after_preposition_pattern(PIECE_UNITS))
            .expect("Piece unit pattern should be valid");
    pub static ref PIECE_QUANTITY_REGEX: Regex =
        Regex::new(&unit_after_quantity_pattern(PIECE_UNITS))
            .expect("Piece unit pattern should be valid");

    /// Explicit delimiters; decimal commas are filtered out by the segmenter
    pub static ref DELIMITER_REGEX: Regex =
        Regex::new(r"[,;]").expect("Delimiter pattern should be valid");
    /// Dictation pauses: "..", "...", or a lone period between words
    pub static ref PAUSE_REGEX: Regex =
        Regex::new(r"\.{2,}|\s+\.\s+").expect("Pause pattern should be valid");
}
