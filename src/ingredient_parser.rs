//! # Ingredient Parser
//!
//! This module turns one dictated utterance into structured ingredient
//! candidates. It segments the utterance, extracts the first price and unit
//! of each segment, strips them from the text to recover the ingredient name,
//! classifies the name and scores the result.
//!
//! ## Features
//!
//! - German and English utterances, mixed price and unit phrasing
//! - Works without punctuation ("avocados 2 euro tomatoes 1.20")
//! - Dietary tags, category and allergens from the local knowledge table
//! - Never fails on text: nonsense yields no or low-confidence candidates
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_pricing::ingredient_parser::parse;
//!
//! let candidates = parse("Bio Tomaten 4.50 pro kg, normale Zwiebeln 1.20");
//!
//! for candidate in &candidates {
//!     println!("{}", candidate);
//! }
//! assert_eq!(candidates[0].name_raw, "Tomaten");
//! assert_eq!(candidates[0].unit, "kg");
//! ```

use crate::classifier::TagClassifier;
use crate::config::{ParserConfig, PipelineConfig};
use crate::extraction::{PriceExtractor, PriceMatch, UnitMatch};
use crate::ingredient_model::{ParsedIngredientCandidate, ValidationReport};
use crate::knowledge::Language;
use crate::segmenter::Segmenter;
use lazy_static::lazy_static;
use log::{debug, info, trace};

/// Starting score of every candidate
pub const BASELINE_SCORE: u8 = 30;
/// Added when the name matched a known ingredient
pub const KNOWN_INGREDIENT_BONUS: u8 = 30;
/// Added when the price lies in the plausible range
pub const PLAUSIBLE_PRICE_BONUS: u8 = 20;
/// Added when a unit was mentioned explicitly
pub const EXPLICIT_UNIT_BONUS: u8 = 20;

pub const PLAUSIBLE_PRICE_MIN: f64 = 0.1;
pub const PLAUSIBLE_PRICE_MAX: f64 = 100.0;

lazy_static! {
    static ref DEFAULT_PARSER: IngredientParser = IngredientParser::new();
}

/// Parse an utterance with the default parser
pub fn parse(utterance: &str) -> Vec<ParsedIngredientCandidate> {
    DEFAULT_PARSER.parse(utterance)
}

/// Validate a candidate before it is saved
pub fn validate(candidate: &ParsedIngredientCandidate) -> ValidationReport {
    candidate.validate()
}

/// Orchestrates segmentation, extraction and classification
#[derive(Clone)]
pub struct IngredientParser {
    segmenter: Segmenter,
    extractor: PriceExtractor,
    classifier: TagClassifier,
    config: ParserConfig,
}

impl IngredientParser {
    /// Create a parser with the built-in tables and default configuration
    pub fn new() -> Self {
        Self::with_config(&PipelineConfig::default())
    }

    /// Create a parser from a pipeline configuration
    pub fn with_config(config: &PipelineConfig) -> Self {
        let extractor = PriceExtractor::new();
        let classifier = TagClassifier::new();
        let segmenter = Segmenter::with_parts(
            extractor.clone(),
            classifier.table(),
            config.segmenter.clone(),
        );
        info!(
            "Creating IngredientParser with {} filler words",
            config.parser.filler_words.len()
        );
        Self {
            segmenter,
            extractor,
            classifier,
            config: config.parser.clone(),
        }
    }

    /// Parse an utterance, detecting its language
    pub fn parse(&self, utterance: &str) -> Vec<ParsedIngredientCandidate> {
        self.parse_with_language(utterance, None)
    }

    /// Parse an utterance with an optional language hint
    pub fn parse_with_language(
        &self,
        utterance: &str,
        language: Option<Language>,
    ) -> Vec<ParsedIngredientCandidate> {
        let language = language.unwrap_or_else(|| Language::detect(utterance));
        let segments = self.segmenter.segment(utterance);
        debug!(
            "Parsing {} segments from utterance ({:?})",
            segments.len(),
            language
        );

        let candidates: Vec<ParsedIngredientCandidate> = segments
            .iter()
            .filter_map(|segment| self.parse_segment(segment, language))
            .collect();

        info!(
            "Parsed {} ingredient candidates from {} segments",
            candidates.len(),
            segments.len()
        );
        candidates
    }

    /// Parse one segment; `None` when nothing is left of the name
    pub fn parse_segment(
        &self,
        segment: &str,
        language: Language,
    ) -> Option<ParsedIngredientCandidate> {
        let prices = self.extractor.extract_prices(segment);
        let units = self.extractor.extract_units(segment);

        let price = prices.first().map(|p| p.price);
        let explicit_unit = units
            .first()
            .map(|u| u.unit.clone())
            .or_else(|| prices.first().and_then(|p| p.unit.clone()));

        let name = self.clean_name(segment, &prices, &units);
        if name.is_empty() {
            debug!("Dropping segment '{}': no ingredient name left", segment);
            return None;
        }

        let classification = self.classifier.classify(&name, language);

        let mut score = BASELINE_SCORE;
        if classification.is_known() {
            score += KNOWN_INGREDIENT_BONUS;
        }
        if price.is_some_and(|p| (PLAUSIBLE_PRICE_MIN..=PLAUSIBLE_PRICE_MAX).contains(&p)) {
            score += PLAUSIBLE_PRICE_BONUS;
        }
        if explicit_unit.is_some() {
            score += EXPLICIT_UNIT_BONUS;
        }

        let unit = explicit_unit.unwrap_or_else(|| self.config.default_unit.clone());
        let mut candidate = ParsedIngredientCandidate::new(&name, segment)
            .with_unit(&unit)
            .with_category(classification.category)
            .with_tags(classification.dietary_properties)
            .with_allergens(classification.allergens)
            .with_score(score);
        if let Some(price) = price {
            candidate = candidate.with_price(price);
        }

        trace!("Segment '{}' -> {} (score {})", segment, candidate, score);
        Some(candidate)
    }

    /// Remove price and unit phrases and filler words, leaving the ingredient name
    fn clean_name(&self, segment: &str, prices: &[PriceMatch], units: &[UnitMatch]) -> String {
        let mut spans: Vec<(usize, usize)> = prices
            .iter()
            .map(|p| (p.position, p.end()))
            .chain(units.iter().map(|u| (u.position, u.end())))
            .collect();
        spans.sort();

        let mut remainder = String::with_capacity(segment.len());
        let mut cursor = 0;
        for (start, end) in spans {
            if start > cursor {
                remainder.push_str(&segment[cursor..start]);
                remainder.push(' ');
            }
            cursor = cursor.max(end);
        }
        if cursor < segment.len() {
            remainder.push_str(&segment[cursor..]);
        }

        let words: Vec<&str> = remainder
            .split_whitespace()
            .filter(|word| !self.is_filler(word))
            .collect();
        let name = words.join(" ");
        name.trim_matches(|c: char| !c.is_alphanumeric())
            .to_string()
    }

    fn is_filler(&self, word: &str) -> bool {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        self.config.filler_words.iter().any(|filler| *filler == word)
    }
}

impl Default for IngredientParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_model::Confidence;
    use crate::knowledge::{Category, DietaryProperty};

    fn parser() -> IngredientParser {
        IngredientParser::new()
    }

    #[test]
    fn test_parse_simple_segment() {
        let candidate = parser()
            .parse_segment("Bio Tomaten 4.50 pro kg", Language::De)
            .unwrap();
        assert_eq!(candidate.name_raw, "Tomaten");
        assert_eq!(candidate.price, Some(4.5));
        assert_eq!(candidate.unit, "kg");
        assert_eq!(candidate.price_unit.as_deref(), Some("per kg"));
        assert_eq!(candidate.category, Some(Category::Vegetables));
        assert!(candidate.tags.contains(&DietaryProperty::Vegan));
        assert_eq!(candidate.confidence, Confidence::High);
        assert_eq!(candidate.raw_input, "Bio Tomaten 4.50 pro kg");
    }

    #[test]
    fn test_default_unit_without_mention() {
        let candidate = parser()
            .parse_segment("Zwiebeln 1.20", Language::De)
            .unwrap();
        assert_eq!(candidate.unit, "piece");
        assert_eq!(candidate.price_unit.as_deref(), Some("per piece"));
        // known + plausible price, no explicit unit
        assert_eq!(candidate.confidence, Confidence::High);
    }

    #[test]
    fn test_unknown_name_scores() {
        let candidate = parser()
            .parse_segment("Wunderkraut 3 Euro", Language::De)
            .unwrap();
        assert_eq!(candidate.confidence, Confidence::Medium);

        let candidate = parser().parse_segment("Wunderkraut", Language::De).unwrap();
        assert_eq!(candidate.confidence, Confidence::Low);
        assert!(candidate.tags.is_empty());
        assert!(candidate.needs_review());
    }

    #[test]
    fn test_implausible_price_gets_no_bonus() {
        let candidate = parser()
            .parse_segment("Trüffel 500 Euro pro kg", Language::De)
            .unwrap();
        assert_eq!(candidate.price, Some(500.0));
        // baseline + unit, unknown name, price above plausible range
        assert_eq!(candidate.confidence, Confidence::Medium);
    }

    #[test]
    fn test_segment_without_name_dropped() {
        assert!(parser().parse_segment("4.50 pro kg", Language::De).is_none());
        assert!(parser().parse_segment("bio für 3", Language::De).is_none());
    }

    #[test]
    fn test_filler_words_whole_word_only() {
        let candidate = parser()
            .parse_segment("Biobutter 2 Euro", Language::De)
            .unwrap();
        assert_eq!(candidate.name_raw, "Biobutter");
    }

    #[test]
    fn test_prepositional_price_stripped() {
        let candidate = parser()
            .parse_segment("Basilikum für 3", Language::De)
            .unwrap();
        assert_eq!(candidate.name_raw, "Basilikum");
        assert_eq!(candidate.price, Some(3.0));
        assert_eq!(candidate.category, Some(Category::Herbs));
    }
}
