//! # Pipeline Configuration Module
//!
//! This module defines configuration structures for the parsing pipeline and
//! the recipe cost calculator. Every field has a compiled-in default; a small
//! set of values can be overridden from the environment or a `.env` file.

use crate::errors::ConfigError;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

// Constants for pipeline configuration
pub const DEFAULT_MAX_SEGMENT_LENGTH: usize = 50;
pub const DEFAULT_KEYWORD_LOOKAHEAD: usize = 3;
pub const DEFAULT_PREP_REFERENCE_BATCH_SIZE: f64 = 100.0;
pub const DEFAULT_UNIT: &str = "piece";

/// Words removed from a segment before the remainder is taken as the ingredient name
pub const DEFAULT_FILLER_WORDS: [&str; 6] = ["pro", "per", "je", "für", "organic", "bio"];

pub const ENV_MAX_SEGMENT_LENGTH: &str = "INGREDIENT_MAX_SEGMENT_LENGTH";
pub const ENV_KEYWORD_LOOKAHEAD: &str = "INGREDIENT_KEYWORD_LOOKAHEAD";
pub const ENV_PREP_REFERENCE_BATCH_SIZE: &str = "PREP_REFERENCE_BATCH_SIZE";
pub const ENV_LABOR_COST_PER_HOUR: &str = "LABOR_COST_PER_HOUR";

/// Segmentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct SegmenterConfig {
    /// A single segment longer than this (in chars) is tried with the keyword split
    pub max_segment_length: usize,
    /// How many tokens the keyword split looks ahead for a price and the next ingredient
    pub keyword_lookahead: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_segment_length: DEFAULT_MAX_SEGMENT_LENGTH,
            keyword_lookahead: DEFAULT_KEYWORD_LOOKAHEAD,
        }
    }
}

/// Ingredient name cleaning settings
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Whole words stripped from the name (case-insensitive)
    pub filler_words: Vec<String>,
    /// Unit assigned when no unit is mentioned
    pub default_unit: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            filler_words: DEFAULT_FILLER_WORDS.iter().map(|w| w.to_string()).collect(),
            default_unit: DEFAULT_UNIT.to_string(),
        }
    }
}

/// Recipe cost calculator settings
#[derive(Debug, Clone, PartialEq)]
pub struct CostingConfig {
    /// Quantity of a prep's own unit that its batch cost refers to
    /// (a batch cost is read as "cost per 100 units")
    pub prep_reference_batch_size: f64,
    /// Labor rate applied to the preparation time, 0 disables labor costing
    pub labor_cost_per_hour: f64,
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            prep_reference_batch_size: DEFAULT_PREP_REFERENCE_BATCH_SIZE,
            labor_cost_per_hour: 0.0,
        }
    }
}

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub segmenter: SegmenterConfig,
    pub parser: ParserConfig,
    pub costing: CostingConfig,
}

impl PipelineConfig {
    /// Load overrides from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides from a dotenv-formatted file without touching the process environment
    // `from_path` would export the file into the process environment; the iterator only reads it
    #[allow(deprecated)]
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for item in dotenv::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            values.insert(key, value);
        }
        debug!(
            "Read {} configuration entries from {}",
            values.len(),
            path.as_ref().display()
        );
        Self::from_lookup(|key| values.get(key).cloned())
    }

    /// Build a configuration from defaults plus whatever `lookup` returns for each known key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_SEGMENT_LENGTH) {
            config.segmenter.max_segment_length = parse_value(ENV_MAX_SEGMENT_LENGTH, &value)?;
        }
        if let Some(value) = lookup(ENV_KEYWORD_LOOKAHEAD) {
            config.segmenter.keyword_lookahead = parse_value(ENV_KEYWORD_LOOKAHEAD, &value)?;
        }
        if let Some(value) = lookup(ENV_PREP_REFERENCE_BATCH_SIZE) {
            config.costing.prep_reference_batch_size =
                parse_value(ENV_PREP_REFERENCE_BATCH_SIZE, &value)?;
        }
        if let Some(value) = lookup(ENV_LABOR_COST_PER_HOUR) {
            config.costing.labor_cost_per_hour = parse_value(ENV_LABOR_COST_PER_HOUR, &value)?;
        }

        config.validate()?;
        info!(
            "Pipeline configuration loaded: max_segment_length={}, keyword_lookahead={}, prep_reference_batch_size={}, labor_cost_per_hour={}",
            config.segmenter.max_segment_length,
            config.segmenter.keyword_lookahead,
            config.costing.prep_reference_batch_size,
            config.costing.labor_cost_per_hour
        );
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segmenter.keyword_lookahead == 0 {
            return Err(ConfigError::OutOfRange {
                key: ENV_KEYWORD_LOOKAHEAD.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        let batch = self.costing.prep_reference_batch_size;
        if !batch.is_finite() || batch <= 0.0 {
            return Err(ConfigError::OutOfRange {
                key: ENV_PREP_REFERENCE_BATCH_SIZE.to_string(),
                reason: format!("must be a positive number, got {batch}"),
            });
        }
        let rate = self.costing.labor_cost_per_hour;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::OutOfRange {
                key: ENV_LABOR_COST_PER_HOUR.to_string(),
                reason: format!("must not be negative, got {rate}"),
            });
        }
        if self.parser.default_unit.trim().is_empty() {
            return Err(ConfigError::OutOfRange {
                key: "default_unit".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.segmenter.max_segment_length, 50);
        assert_eq!(config.segmenter.keyword_lookahead, 3);
        assert_eq!(config.costing.prep_reference_batch_size, 100.0);
        assert_eq!(config.parser.default_unit, "piece");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = PipelineConfig::from_lookup(|key| match key {
            ENV_PREP_REFERENCE_BATCH_SIZE => Some("250".to_string()),
            ENV_LABOR_COST_PER_HOUR => Some(" 18.5 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.costing.prep_reference_batch_size, 250.0);
        assert_eq!(config.costing.labor_cost_per_hour, 18.5);
        assert_eq!(config.segmenter.max_segment_length, 50);
    }

    #[test]
    fn test_invalid_value() {
        let err = PipelineConfig::from_lookup(|key| {
            (key == ENV_MAX_SEGMENT_LENGTH).then(|| "fifty".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_MAX_SEGMENT_LENGTH.to_string(),
                value: "fifty".to_string()
            }
        );
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = PipelineConfig::from_lookup(|key| {
            (key == ENV_PREP_REFERENCE_BATCH_SIZE).then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }
}
