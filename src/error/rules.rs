use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read rules file '{path}': {message}")]
    RulesFileReadError { path: PathBuf, message: String },

    #[error("failed to parse rules file '{path}': {message}")]
    RulesParseError { path: PathBuf, message: String },

    #[error("unsupported rules format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },

    #[error("invalid {family} pattern '{pattern}': {message}")]
    InvalidPattern {
        family: String,
        pattern: String,
        message: String,
    },
}

impl RulesError {
    pub fn rules_file_read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::RulesFileReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn rules_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::RulesParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn invalid_pattern(
        family: impl Into<String>,
        pattern: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern {
            family: family.into(),
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
