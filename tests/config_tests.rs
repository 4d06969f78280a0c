//! # Configuration Tests
//!
//! Loading pipeline configuration from dotenv-formatted files.

use ingredient_pricing::config::{PipelineConfig, DEFAULT_MAX_SEGMENT_LENGTH};
use ingredient_pricing::errors::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

#[cfg(test)]
mod tests {
    use super::*;

    fn create_env_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_from_env_file() {
        let file = create_env_file(
            "# costing\nPREP_REFERENCE_BATCH_SIZE=1000\nLABOR_COST_PER_HOUR=18.5\nINGREDIENT_KEYWORD_LOOKAHEAD=4\n",
        );

        let config = PipelineConfig::from_env_file(file.path()).unwrap();
        assert_eq!(config.costing.prep_reference_batch_size, 1000.0);
        assert_eq!(config.costing.labor_cost_per_hour, 18.5);
        assert_eq!(config.segmenter.keyword_lookahead, 4);
        assert_eq!(config.segmenter.max_segment_length, DEFAULT_MAX_SEGMENT_LENGTH);
    }

    #[test]
    fn test_invalid_value_in_file() {
        let file = create_env_file("INGREDIENT_MAX_SEGMENT_LENGTH=long\n");
        let err = PipelineConfig::from_env_file(file.path()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "INGREDIENT_MAX_SEGMENT_LENGTH".to_string(),
                value: "long".to_string()
            }
        );
    }

    #[test]
    fn test_negative_labor_rate_rejected() {
        let file = create_env_file("LABOR_COST_PER_HOUR=-5\n");
        let err = PipelineConfig::from_env_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_env_file("/nonexistent/ingredient-pricing.env").unwrap_err();
        assert!(matches!(err, ConfigError::Source(_)));
    }
}
