//! Error types for textcap-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Feedback thresholds are out of range or out of order.
    #[error(
        "invalid thresholds: warning ({warning}%) must be below critical ({critical}%), both within 1..=100"
    )]
    InvalidThresholds {
        /// Configured warning threshold percentage.
        warning: u8,
        /// Configured critical threshold percentage.
        critical: u8,
    },

    /// Fill column must be positive.
    #[error("fill_column must be greater than zero")]
    InvalidFillColumn,

    /// The scope file pattern is not a valid glob.
    #[error("invalid file pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// Underlying glob compilation error.
        #[source]
        source: globset::Error,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by user-facing limit commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// An unknown profile name was provided.
    #[error("unknown profile: {name}. Use: {available}")]
    UnknownProfile {
        /// The profile name that was requested.
        name: String,
        /// Comma-separated list of available profile names.
        available: String,
    },
}

/// Result type alias using [`LimitError`].
pub type LimitResult<T> = Result<T, LimitError>;
