//! # Ingredient Pricing
//!
//! Parses dictated ingredient lists (German/English, mixed price and unit
//! phrasing) into structured ingredient candidates and computes recipe food
//! cost, suggested prices and profit margins.

pub mod classifier;
pub mod config;
pub mod cost_calculator;
pub mod errors;
pub mod extraction;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod knowledge;
pub mod price_patterns;
pub mod segmenter;
pub mod units;

pub use classifier::{Classification, TagClassifier};
pub use config::PipelineConfig;
pub use cost_calculator::{calculate_profit_margin, Component, PricingCalculation, RecipeCostCalculator};
pub use errors::{ConfigError, ConversionError};
pub use extraction::{PriceExtractor, PriceMatch, UnitMatch};
pub use ingredient_model::{Confidence, ParsedIngredientCandidate, ValidationReport};
pub use ingredient_parser::{parse, validate, IngredientParser};
pub use knowledge::{Allergen, Category, DietaryProperty, Language};
pub use segmenter::Segmenter;
pub use units::{convert, normalize_unit};
