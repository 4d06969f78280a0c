//! # Tag/Category Classifier
//!
//! Maps a raw ingredient name (German or English) to a category, dietary
//! properties and allergens using the [`KnowledgeTable`].
//!
//! Matching is a case-insensitive substring test in both directions. An
//! exemplar found inside a longer name must start a word or close a compound
//! ("weizen|mehl"), so "Preis" is not rice and "Computer" is not turkey. Match
//! kinds are tried strongest first (exact, exemplar inside the name, name
//! inside an exemplar); within one kind the hinted language is consulted
//! before the other one, and the first category in table order wins.
//!
//! Allergen keywords are applied afterwards and independently of the category,
//! so an unrecognized name can still carry allergens.
//!
//! ```rust
//! use ingredient_pricing::classifier::TagClassifier;
//! use ingredient_pricing::knowledge::{Allergen, Category, Language};
//!
//! let classifier = TagClassifier::new();
//! let result = classifier.classify("Käse", Language::De);
//! assert_eq!(result.category, Some(Category::Dairy));
//! assert!(result.allergens.contains(&Allergen::Dairy));
//! ```

use crate::knowledge::{Allergen, Category, DietaryProperty, KnowledgeTable, Language};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Confidence assigned to any category match before the match-kind boost
pub const BASELINE_CONFIDENCE: u8 = 50;

/// Names shorter than this are not looked up inside exemplars
const MIN_REVERSE_MATCH_CHARS: usize = 3;

/// Characters a compound needs in front of a trailing exemplar
const MIN_COMPOUND_PREFIX_CHARS: usize = 3;

/// How a name matched an exemplar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Name equals the exemplar
    Exact,
    /// Exemplar appears inside the name ("bio tomaten" ⊃ "tomaten")
    ExemplarInName,
    /// Name appears inside the exemplar ("oliven" ⊂ "olivenöl")
    NameInExemplar,
}

impl MatchKind {
    const ORDER: [MatchKind; 3] = [
        MatchKind::Exact,
        MatchKind::ExemplarInName,
        MatchKind::NameInExemplar,
    ];

    fn boost(&self) -> u8 {
        match self {
            MatchKind::Exact => 45,
            MatchKind::ExemplarInName => 35,
            MatchKind::NameInExemplar => 30,
        }
    }

    fn matches(&self, name: &str, exemplar: &str) -> bool {
        match self {
            MatchKind::Exact => name == exemplar,
            MatchKind::ExemplarInName => contains_at_boundary(name, exemplar),
            MatchKind::NameInExemplar => {
                name.chars().count() >= MIN_REVERSE_MATCH_CHARS && exemplar.contains(name)
            }
        }
    }
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Option<Category>,
    pub dietary_properties: BTreeSet<DietaryProperty>,
    pub allergens: BTreeSet<Allergen>,
    /// 0 when no category matched, otherwise baseline plus match boost
    pub confidence: u8,
    /// Exemplar that produced the category match
    pub matched_term: Option<String>,
    pub match_kind: Option<MatchKind>,
}

impl Classification {
    fn unmatched() -> Self {
        Self {
            category: None,
            dietary_properties: BTreeSet::new(),
            allergens: BTreeSet::new(),
            confidence: 0,
            matched_term: None,
            match_kind: None,
        }
    }

    /// Whether the name matched a known ingredient
    pub fn is_known(&self) -> bool {
        self.category.is_some()
    }
}

/// Local, table-driven ingredient classifier
#[derive(Debug, Clone)]
pub struct TagClassifier {
    table: &'static KnowledgeTable,
}

impl TagClassifier {
    /// Create a classifier over the built-in knowledge table
    pub fn new() -> Self {
        Self::with_table(KnowledgeTable::builtin())
    }

    /// Create a classifier over a specific table
    pub fn with_table(table: &'static KnowledgeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'static KnowledgeTable {
        self.table
    }

    /// Classify an ingredient name
    pub fn classify(&self, ingredient_name: &str, language: Language) -> Classification {
        let name = normalize_name(ingredient_name);
        let mut result = Classification::unmatched();
        if name.is_empty() {
            return result;
        }

        if let Some((category, exemplar, kind)) = self.find_category(&name, language) {
            let entry_dietary = self
                .table
                .categories
                .iter()
                .find(|entry| entry.category == category)
                .map(|entry| entry.dietary.clone())
                .unwrap_or_default();

            result.category = Some(category);
            result.dietary_properties = entry_dietary.into_iter().collect();
            result.confidence = BASELINE_CONFIDENCE + kind.boost();
            result.matched_term = Some(exemplar.to_string());
            result.match_kind = Some(kind);
            debug!(
                "Classified '{}' as {} via '{}' ({:?})",
                ingredient_name, category, exemplar, kind
            );
        } else {
            debug!("No category for '{}'", ingredient_name);
        }

        result.allergens = self.detect_allergens(&name);
        result
    }

    fn find_category(
        &self,
        name: &str,
        language: Language,
    ) -> Option<(Category, &'static str, MatchKind)> {
        for kind in MatchKind::ORDER {
            for lang in [language, language.other()] {
                for entry in &self.table.categories {
                    for exemplar in entry.exemplars(lang) {
                        if kind.matches(name, exemplar) {
                            return Some((entry.category, *exemplar, kind));
                        }
                    }
                }
            }
        }
        None
    }

    /// Allergens whose keywords appear anywhere in the (normalized) name
    pub fn detect_allergens(&self, name: &str) -> BTreeSet<Allergen> {
        let name = normalize_name(name);
        let mut allergens = BTreeSet::new();
        for rule in &self.table.allergens {
            if let Some(keyword) = rule.keywords.iter().find(|k| name.contains(*k)) {
                trace!(
                    "Allergen keyword '{}' flags {} in '{}'",
                    keyword,
                    rule.allergen,
                    name
                );
                allergens.insert(rule.allergen);
            }
        }
        allergens
    }
}

impl Default for TagClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// `exemplar` occurs in `name` at a word start, or at a word end after a
/// compound prefix of at least [`MIN_COMPOUND_PREFIX_CHARS`]
fn contains_at_boundary(name: &str, exemplar: &str) -> bool {
    name.match_indices(exemplar).any(|(start, matched)| {
        let prefix_chars = name[..start]
            .chars()
            .rev()
            .take_while(|c| c.is_alphanumeric())
            .count();
        let at_word_end = name[start + matched.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        prefix_chars == 0 || (at_word_end && prefix_chars >= MIN_COMPOUND_PREFIX_CHARS)
    })
}

fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TagClassifier {
        TagClassifier::new()
    }

    #[test]
    fn test_exact_match() {
        let result = classifier().classify("Tomate", Language::De);
        assert_eq!(result.category, Some(Category::Vegetables));
        assert_eq!(result.match_kind, Some(MatchKind::Exact));
        assert_eq!(result.confidence, 95);
    }

    #[test]
    fn test_exemplar_in_name() {
        let result = classifier().classify("Premium Olivenöl", Language::De);
        assert_eq!(result.category, Some(Category::Oils));
        assert_eq!(result.match_kind, Some(MatchKind::ExemplarInName));
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn test_name_in_exemplar() {
        let result = classifier().classify("Schnitt", Language::De);
        assert_eq!(result.category, Some(Category::Herbs));
        assert_eq!(result.match_kind, Some(MatchKind::NameInExemplar));
        assert_eq!(result.confidence, 80);
    }

    #[test]
    fn test_exact_beats_earlier_category_substring() {
        // "pepper" is inside the vegetable exemplar "bell pepper" but is itself a spice
        let result = classifier().classify("pepper", Language::En);
        assert_eq!(result.category, Some(Category::Spices));
    }

    #[test]
    fn test_compound_suffix_matches() {
        let result = classifier().classify("Dinkelmehl", Language::De);
        assert_eq!(result.category, Some(Category::Grains));
        assert_eq!(result.matched_term.as_deref(), Some("mehl"));
    }

    #[test]
    fn test_exemplar_inside_unrelated_word() {
        let result = classifier().classify("Computer", Language::En);
        assert_eq!(result.category, None);

        let result = classifier().classify("Preis", Language::De);
        assert_ne!(result.category, Some(Category::Grains));
    }

    #[test]
    fn test_boundary_rule() {
        assert!(contains_at_boundary("premium olivenöl", "olivenöl"));
        assert!(contains_at_boundary("weizenmehl", "mehl"));
        assert!(contains_at_boundary("zwiebeln", "zwiebel"));
        assert!(!contains_at_boundary("preis", "reis"));
        assert!(!contains_at_boundary("computer", "pute"));
        assert!(!contains_at_boundary("champignon", "ham"));
    }

    #[test]
    fn test_short_name_not_reverse_matched() {
        let result = classifier().classify("ap", Language::En);
        assert_eq!(result.category, None);
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn test_unknown_name() {
        let result = classifier().classify("Wunderkraut", Language::De);
        assert!(!result.is_known());
        assert!(result.dietary_properties.is_empty());
        assert!(result.allergens.is_empty());
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn test_allergen_override_on_unknown_name() {
        let result = classifier().classify("Mandelkrokant", Language::De);
        assert_eq!(result.category, None);
        assert!(result.allergens.contains(&Allergen::Nuts));
    }

    #[test]
    fn test_empty_name() {
        let result = classifier().classify("   ", Language::En);
        assert_eq!(result, Classification::unmatched());
    }
}
