//! # Error Types Module
//!
//! This module defines the error types of the parsing and costing core.
//! Free-text parsing never fails; the only hard failures are impossible unit
//! conversions and invalid runtime configuration.

/// Errors returned by [`crate::units::convert`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The unit is not a recognized synonym of any canonical unit
    UnknownUnit(String),
    /// Source and target units measure different dimensions (e.g. grams to liters)
    DimensionMismatch {
        /// Canonical code of the source unit
        from: String,
        /// Canonical code of the target unit
        to: String,
    },
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnknownUnit(unit) => write!(f, "Unknown unit: {unit}"),
            ConversionError::DimensionMismatch { from, to } => {
                write!(f, "Cannot convert between {from} and {to}: different dimensions")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

/// Errors raised while loading or validating [`crate::config::PipelineConfig`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A configuration value could not be parsed
    InvalidValue { key: String, value: String },
    /// A configuration value parsed but is outside its allowed range
    OutOfRange { key: String, reason: String },
    /// The configuration file could not be read
    Source(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {key}: '{value}'")
            }
            ConfigError::OutOfRange { key, reason } => write!(f, "{key} out of range: {reason}"),
            ConfigError::Source(msg) => write!(f, "Configuration source error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<dotenv::Error> for ConfigError {
    fn from(err: dotenv::Error) -> Self {
        ConfigError::Source(err.to_string())
    }
}
