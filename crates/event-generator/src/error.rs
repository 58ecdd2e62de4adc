//! Error types for event generation.

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A rate parameter is NaN or outside [0, 1].
    #[error("Invalid {name}: {value} (must be within [0, 1])")]
    InvalidRate { name: &'static str, value: f64 },

    /// The null and orphan rates leave a negative share for valid references.
    #[error("null_rate ({null_rate}) + orphan_rate ({orphan_rate}) must not exceed 1.0")]
    RatesExceedOne { null_rate: f64, orphan_rate: f64 },

    /// Any other invalid generator setting.
    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    /// A weighted table has no entries or only zero weights.
    #[error("Weighted table must contain at least one entry with a positive weight")]
    EmptyWeightTable,

    /// Valid campaign references were requested but none are known.
    #[error("No known campaign references to draw from")]
    NoKnownReferences,

    /// Error reading a config file.
    #[error("Failed to read generator config: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a YAML config.
    #[error("Failed to parse generator config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// Whether the error stems from invalid configuration (as opposed to
    /// missing input data or I/O).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GeneratorError::InvalidRate { .. }
                | GeneratorError::RatesExceedOne { .. }
                | GeneratorError::InvalidConfig(_)
                | GeneratorError::EmptyWeightTable
        )
    }
}
