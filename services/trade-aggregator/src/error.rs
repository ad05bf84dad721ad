//! Error types for the trade aggregator

use std::path::PathBuf;
use thiserror::Error;

/// Trade aggregator error types
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// The trade input could not be opened
    #[error("Cannot open input file {}: {source}", .path.display())]
    SourceUnavailable {
        /// Path of the input that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The statistics output could not be created
    #[error("Cannot create output file {}: {source}", .path.display())]
    SinkUnavailable {
        /// Path of the output that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Writing the statistics failed part way
    #[error("Failed to write statistics: {0}")]
    SinkWrite(#[from] std::io::Error),

    /// The sink already persisted a result and cannot accept another
    #[error("Statistics sink is closed")]
    SinkClosed,

    /// Processor or settings are incomplete or inconsistent
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is missing or inconsistent
        message: String,
    },

    /// Configuration file or environment could not be loaded
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl AggregatorError {
    /// Build a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Type alias for trade aggregator results
pub type AggregatorResult<T> = Result<T, AggregatorError>;
