//! # Price and Unit Extraction Module
//!
//! This module scans dictated text for price amounts and unit mentions using
//! ordered lists of regex strategies.
//!
//! ## Features
//!
//! - Currency amounts ("2 Euro", "€3", "12 EUR pro Liter")
//! - Per-unit phrasing ("4.50 pro kg", "2,50 kg") and prepositional phrasing ("für 3")
//! - Bare decimals ("1.20"); integers before a unit ("500 g") are quantities
//! - German decimal comma ("2,50")
//! - Weight, volume and piece units in "pro kg" and "500 g" forms
//!
//! Results are ordered by position. Overlapping matches from different
//! patterns are all kept; callers pick the first one.

use crate::price_patterns::{
    AMOUNT_PER_UNIT_REGEX, AMOUNT_WITH_CURRENCY_REGEX, BARE_DECIMAL_REGEX, CURRENCY_PREFIX_REGEX,
    DECIMAL_WITH_UNIT_REGEX, LEADING_UNIT_REGEX, PIECE_PREPOSITION_REGEX, PIECE_QUANTITY_REGEX, PREPOSITIONAL_AMOUNT_REGEX,
    VOLUME_PREPOSITION_REGEX, VOLUME_QUANTITY_REGEX, WEIGHT_PREPOSITION_REGEX,
    WEIGHT_QUANTITY_REGEX,
};
use crate::units::normalize_unit;
use log::{debug, trace};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Prices outside this open interval are treated as noise
pub const MIN_PRICE_EXCLUSIVE: f64 = 0.0;
pub const MAX_PRICE_EXCLUSIVE: f64 = 1000.0;

/// Currency of every extracted price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
}

/// A price found in text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceMatch {
    /// Parsed amount, always in (0, 1000)
    pub price: f64,
    pub currency: Currency,
    /// Canonical unit when the price phrase names one ("4.50 pro kg")
    pub unit: Option<String>,
    /// Byte offset of the match in the scanned text
    pub position: usize,
    /// The matched text
    pub raw: String,
}

impl PriceMatch {
    /// Byte offset just past the match
    pub fn end(&self) -> usize {
        self.position + self.raw.len()
    }
}

/// A unit mention found in text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitMatch {
    /// Canonical unit code
    pub unit: String,
    /// Byte offset of the match in the scanned text
    pub position: usize,
    /// The matched text
    pub raw: String,
}

impl UnitMatch {
    pub fn end(&self) -> usize {
        self.position + self.raw.len()
    }
}

/// Turns one regex hit into a price match, or rejects it
type PriceHandler = fn(&str, &Captures<'_>) -> Option<PriceMatch>;

/// One price-detection strategy
#[derive(Clone)]
pub struct PricePattern {
    pub name: &'static str,
    regex: Regex,
    handler: PriceHandler,
}

/// One unit-detection strategy
#[derive(Clone)]
pub struct UnitPattern {
    pub name: &'static str,
    regex: Regex,
}

/// Extracts prices and units from dictated text
#[derive(Clone)]
pub struct PriceExtractor {
    price_patterns: Vec<PricePattern>,
    unit_patterns: Vec<UnitPattern>,
}

impl PriceExtractor {
    /// Create an extractor with the built-in pattern lists
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingredient_pricing::extraction::PriceExtractor;
    ///
    /// let extractor = PriceExtractor::new();
    /// let prices = extractor.extract_prices("Tomaten 4,50 pro kg");
    /// assert_eq!(prices[0].price, 4.5);
    /// assert_eq!(prices[0].unit.as_deref(), Some("kg"));
    /// ```
    pub fn new() -> Self {
        let price_patterns = vec![
            PricePattern {
                name: "amount_with_currency",
                regex: AMOUNT_WITH_CURRENCY_REGEX.clone(),
                handler: amount_with_unit,
            },
            PricePattern {
                name: "currency_prefix",
                regex: CURRENCY_PREFIX_REGEX.clone(),
                handler: amount_with_unit,
            },
            PricePattern {
                name: "amount_per_unit",
                regex: AMOUNT_PER_UNIT_REGEX.clone(),
                handler: amount_with_unit,
            },
            PricePattern {
                name: "decimal_with_unit",
                regex: DECIMAL_WITH_UNIT_REGEX.clone(),
                handler: amount_with_unit,
            },
            PricePattern {
                name: "prepositional_amount",
                regex: PREPOSITIONAL_AMOUNT_REGEX.clone(),
                handler: amount_not_quantity,
            },
            PricePattern {
                name: "bare_decimal",
                regex: BARE_DECIMAL_REGEX.clone(),
                handler: amount_not_quantity,
            },
        ];

        let unit_patterns = vec![
            UnitPattern {
                name: "weight_preposition",
                regex: WEIGHT_PREPOSITION_REGEX.clone(),
            },
            UnitPattern {
                name: "weight_quantity",
                regex: WEIGHT_QUANTITY_REGEX.clone(),
            },
            UnitPattern {
                name: "volume_preposition",
                regex: VOLUME_PREPOSITION_REGEX.clone(),
            },
            UnitPattern {
                name: "volume_quantity",
                regex: VOLUME_QUANTITY_REGEX.clone(),
            },
            UnitPattern {
                name: "piece_preposition",
                regex: PIECE_PREPOSITION_REGEX.clone(),
            },
            UnitPattern {
                name: "piece_quantity",
                regex: PIECE_QUANTITY_REGEX.clone(),
            },
        ];

        Self {
            price_patterns,
            unit_patterns,
        }
    }

    /// Names of the price strategies, in the order they are applied
    pub fn price_pattern_names(&self) -> Vec<&'static str> {
        self.price_patterns.iter().map(|p| p.name).collect()
    }

    /// Find every price in `text`, ordered by position
    pub fn extract_prices(&self, text: &str) -> Vec<PriceMatch> {
        let mut matches = Vec::new();

        for pattern in &self.price_patterns {
            for captures in pattern.regex.captures_iter(text) {
                match (pattern.handler)(text, &captures) {
                    Some(found) if is_accepted_price(found.price) => {
                        trace!(
                            "Pattern '{}' matched price {} in '{}'",
                            pattern.name,
                            found.price,
                            found.raw
                        );
                        matches.push(found);
                    }
                    Some(found) => {
                        debug!(
                            "Discarding out-of-range price {} from '{}'",
                            found.price, found.raw
                        );
                    }
                    None => {}
                }
            }
        }

        // Stable: pattern order breaks ties at the same position
        matches.sort_by_key(|m| m.position);
        debug!("Found {} price matches in '{}'", matches.len(), text);
        matches
    }

    /// Find every unit mention in `text`, ordered by position
    pub fn extract_units(&self, text: &str) -> Vec<UnitMatch> {
        let mut matches = Vec::new();

        for pattern in &self.unit_patterns {
            for captures in pattern.regex.captures_iter(text) {
                let (Some(whole), Some(unit)) = (captures.get(0), captures.get(1)) else {
                    continue;
                };
                trace!(
                    "Pattern '{}' matched unit '{}'",
                    pattern.name,
                    whole.as_str()
                );
                matches.push(UnitMatch {
                    unit: normalize_unit(unit.as_str()),
                    position: whole.start(),
                    raw: whole.as_str().to_string(),
                });
            }
        }

        matches.sort_by_key(|m| m.position);
        debug!("Found {} unit matches in '{}'", matches.len(), text);
        matches
    }

    /// Check if the text contains at least one accepted price
    pub fn has_price(&self, text: &str) -> bool {
        !self.extract_prices(text).is_empty()
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an amount, accepting a German decimal comma
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

fn is_accepted_price(price: f64) -> bool {
    price.is_finite() && price > MIN_PRICE_EXCLUSIVE && price < MAX_PRICE_EXCLUSIVE
}

/// Amount in group 1, optional unit in group 2
fn amount_with_unit(_text: &str, captures: &Captures<'_>) -> Option<PriceMatch> {
    let whole = captures.get(0)?;
    let price = parse_amount(captures.get(1)?.as_str())?;
    Some(PriceMatch {
        price,
        currency: Currency::Eur,
        unit: captures.get(2).map(|u| normalize_unit(u.as_str())),
        position: whole.start(),
        raw: whole.as_str().to_string(),
    })
}

/// Amount in group 1; rejected when a unit word follows. "für 2 kg" is a quantity,
/// and a decimal before a unit is already matched with its unit attached
fn amount_not_quantity(text: &str, captures: &Captures<'_>) -> Option<PriceMatch> {
    let whole = captures.get(0)?;
    if LEADING_UNIT_REGEX.is_match(&text[whole.end()..]) {
        trace!("'{}' is followed by a unit, treating as quantity", whole.as_str());
        return None;
    }
    amount_with_unit(text, captures)
}
