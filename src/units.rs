//! # Unit Normalizer
//!
//! Canonicalizes German and English unit-of-measure spellings to the five
//! canonical unit codes (`kg`, `g`, `l`, `ml`, `piece`) and converts amounts
//! between units of the same dimension.
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_pricing::units::{convert, normalize_unit};
//!
//! assert_eq!(normalize_unit("Kilogramm"), "kg");
//! assert_eq!(normalize_unit("Stück"), "piece");
//! assert_eq!(normalize_unit("Bund"), "Bund"); // unknown units pass through
//!
//! assert_eq!(convert(1.5, "kg", "g").unwrap(), 1500.0);
//! assert!(convert(1.0, "g", "l").is_err());
//! ```

use crate::errors::ConversionError;
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Canonical units of measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Kilograms
    Kilograms,
    /// Grams
    Grams,
    /// Liters
    Liters,
    /// Milliliters
    Milliliters,
    /// Individual pieces/items
    Pieces,
}

/// What a unit measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Weight,
    Volume,
    Count,
}

/// Synonym table, keys lowercase
static UNIT_MAPPINGS: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Weight units
    for key in [
        "kg", "kgs", "kilo", "kilos", "kilogramm", "kilogramms", "kilogram", "kilograms",
        "kilogramme", "kilogrammes",
    ] {
        map.insert(key, Unit::Kilograms);
    }
    for key in [
        "g", "gr", "grm", "gramm", "gramms", "gram", "grams", "gramme", "grammes",
    ] {
        map.insert(key, Unit::Grams);
    }

    // Volume units
    for key in [
        "l", "ltr", "liter", "liters", "litre", "litres", "lt",
    ] {
        map.insert(key, Unit::Liters);
    }
    for key in [
        "ml", "milliliter", "milliliters", "millilitre", "millilitres",
    ] {
        map.insert(key, Unit::Milliliters);
    }

    // Count units
    for key in [
        "piece", "pieces", "pc", "pcs", "stück", "stücke", "stueck", "stk", "st", "each", "item",
        "items",
    ] {
        map.insert(key, Unit::Pieces);
    }

    map
});

impl Unit {
    /// Canonical unit code
    pub fn code(&self) -> &'static str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Liters => "l",
            Unit::Milliliters => "ml",
            Unit::Pieces => "piece",
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Kilograms | Unit::Grams => Dimension::Weight,
            Unit::Liters | Unit::Milliliters => Dimension::Volume,
            Unit::Pieces => Dimension::Count,
        }
    }

    /// Factor to the dimension's base unit (g, ml, piece)
    fn base_factor(&self) -> f64 {
        match self {
            Unit::Kilograms => 1000.0,
            Unit::Grams => 1.0,
            Unit::Liters => 1000.0,
            Unit::Milliliters => 1.0,
            Unit::Pieces => 1.0,
        }
    }

    /// Check if this is a weight unit
    pub fn is_weight(&self) -> bool {
        self.dimension() == Dimension::Weight
    }

    /// Check if this is a volume unit
    pub fn is_volume(&self) -> bool {
        self.dimension() == Dimension::Volume
    }

    /// Check if this is a count unit
    pub fn is_count(&self) -> bool {
        self.dimension() == Dimension::Count
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Look up a unit synonym, case-insensitive and trimmed
pub fn parse_unit(raw: &str) -> Option<Unit> {
    let key = raw.trim().to_lowercase();
    if let Some(unit) = UNIT_MAPPINGS.get(key.as_str()) {
        return Some(*unit);
    }

    // Trailing period from dictation ("Stk.", "gr.")
    let key = key.trim_end_matches('.');
    UNIT_MAPPINGS.get(key).copied()
}

/// Every recognized spelling, lowercase and sorted
pub fn synonyms() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = UNIT_MAPPINGS.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Canonical unit code for a recognized synonym; anything else is returned unchanged
pub fn normalize_unit(raw: &str) -> String {
    match parse_unit(raw) {
        Some(unit) => unit.code().to_string(),
        None => {
            trace!("Unit '{}' not recognized, leaving as-is", raw);
            raw.to_string()
        }
    }
}

/// Convert `amount` from one unit to another of the same dimension
pub fn convert(amount: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    let from = parse_unit(from_unit).ok_or_else(|| ConversionError::UnknownUnit(from_unit.to_string()))?;
    let to = parse_unit(to_unit).ok_or_else(|| ConversionError::UnknownUnit(to_unit.to_string()))?;

    if from.dimension() != to.dimension() {
        return Err(ConversionError::DimensionMismatch {
            from: from.code().to_string(),
            to: to.code().to_string(),
        });
    }

    Ok(amount * from.base_factor() / to.base_factor())
}

/// Human-readable "per <unit>" annotation for a price
pub fn price_unit_label(unit: &str) -> String {
    format!("per {}", normalize_unit(unit))
}
