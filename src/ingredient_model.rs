//! # Parsed Ingredient Data Model
//!
//! This module defines the structures handed back to callers after parsing a
//! dictated utterance: one [`ParsedIngredientCandidate`] per ingredient
//! mention, its derived [`Confidence`], and the [`ValidationReport`] produced
//! on request before a candidate is saved.
//!
//! ## Core Concepts
//!
//! - **Candidate**: a best-effort extraction, possibly incomplete
//! - **Confidence**: coarse trust level derived from independent matching signals
//! - **Validation**: caller-invoked checks that accumulate messages, never fail
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_pricing::ingredient_model::{Confidence, ParsedIngredientCandidate};
//!
//! let candidate = ParsedIngredientCandidate::new("Tomaten", "Tomaten 4.50 pro kg")
//!     .with_price(4.5)
//!     .with_unit("kg");
//!
//! assert_eq!(candidate.price_unit.as_deref(), Some("per kg"));
//! assert_eq!(candidate.confidence, Confidence::Low);
//! ```

use crate::config::DEFAULT_UNIT;
use crate::knowledge::{Allergen, Category, DietaryProperty};
use crate::units::price_unit_label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Score thresholds for the confidence levels
pub const HIGH_CONFIDENCE_SCORE: u8 = 80;
pub const MEDIUM_CONFIDENCE_SCORE: u8 = 50;

/// Highest price accepted by validation
pub const MAX_VALID_PRICE: f64 = 1000.0;
pub const MIN_NAME_CHARS: usize = 2;

/// Trust level of a parsed candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Threshold a cumulative signal score into a level
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_CONFIDENCE_SCORE {
            Confidence::High
        } else if score >= MEDIUM_CONFIDENCE_SCORE {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        f.write_str(label)
    }
}

/// One ingredient extracted from an utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedIngredientCandidate {
    /// Ingredient name as dictated, fillers and price phrases removed
    pub name_raw: String,

    /// Price in EUR, within (0, 1000) when present
    pub price: Option<f64>,

    /// Canonical unit code, "piece" when none was mentioned
    pub unit: String,

    /// "per <unit>" annotation, present together with a price
    pub price_unit: Option<String>,

    /// Dietary properties inferred by the classifier
    pub tags: BTreeSet<DietaryProperty>,

    /// Category inferred by the classifier
    pub category: Option<Category>,

    /// Allergens flagged by keyword
    pub allergens: BTreeSet<Allergen>,

    pub confidence: Confidence,

    /// Segment text the candidate was extracted from
    pub raw_input: String,
}

/// Result of [`ParsedIngredientCandidate::validate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ParsedIngredientCandidate {
    /// Create a candidate with just a name and its source segment
    pub fn new(name: &str, raw_input: &str) -> Self {
        Self {
            name_raw: name.trim().to_string(),
            price: None,
            unit: DEFAULT_UNIT.to_string(),
            price_unit: None,
            tags: BTreeSet::new(),
            category: None,
            allergens: BTreeSet::new(),
            confidence: Confidence::Low,
            raw_input: raw_input.to_string(),
        }
    }

    /// Add a price
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self.price_unit = Some(price_unit_label(&self.unit));
        self
    }

    /// Set the unit (normalized), keeping the price annotation in sync
    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = crate::units::normalize_unit(unit);
        if self.price.is_some() {
            self.price_unit = Some(price_unit_label(&self.unit));
        }
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags(mut self, tags: BTreeSet<DietaryProperty>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_allergens(mut self, allergens: BTreeSet<Allergen>) -> Self {
        self.allergens = allergens;
        self
    }

    /// Set the confidence from a cumulative signal score
    pub fn with_score(mut self, score: u8) -> Self {
        self.confidence = Confidence::from_score(score);
        self
    }

    /// Check if this candidate carries a price
    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }

    /// Whether a person should look at this candidate before it is saved
    pub fn needs_review(&self) -> bool {
        self.confidence == Confidence::Low || self.price.is_none()
    }

    /// Check the candidate before saving; all problems are reported together
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        if self.name_raw.trim().chars().count() < MIN_NAME_CHARS {
            errors.push(format!(
                "Name must be at least {MIN_NAME_CHARS} characters long"
            ));
        }

        match self.price {
            None => errors.push("Price is missing".to_string()),
            Some(price) if !(price > 0.0 && price <= MAX_VALID_PRICE) => errors.push(format!(
                "Price {price} must be greater than 0 and at most {MAX_VALID_PRICE}"
            )),
            Some(_) => {}
        }

        if self.unit.trim().is_empty() {
            errors.push("Unit is missing".to_string());
        }

        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl fmt::Display for ParsedIngredientCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name_raw)?;

        if let Some(price) = self.price {
            write!(f, " {:.2} EUR", price)?;
            if let Some(price_unit) = &self.price_unit {
                write!(f, " {}", price_unit)?;
            }
        }

        if let Some(category) = &self.category {
            write!(f, " [{}]", category)?;
        }

        write!(f, " ({} confidence)", self.confidence)
    }
}
