use std::path::PathBuf;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for pbsdo
#[derive(Error, Debug)]
pub enum PbsDoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Requested group count must be at least 1 (got {0})")]
    InvalidGroupCount(usize),

    #[error("Non-unique argument in input: {0}")]
    DuplicateArgument(String),

    #[error("No arguments specified")]
    EmptyInput,

    #[error("{mem} is an invalid amount of job memory (must be 1-180 gb)")]
    InvalidMemory { mem: u64 },

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },

    #[error("arguments do not exist: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    #[error("Submit command '{command}' failed with status {status}")]
    SubmitFailed { command: String, status: i32 },

    #[error("Failed to read argument file {0}: {1}")]
    ArgFileRead(PathBuf, std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PbsDoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_argument_display() {
        let err = PbsDoError::DuplicateArgument("file_1.txt".to_string());
        assert_eq!(err.to_string(), "Non-unique argument in input: file_1.txt");
    }

    #[test]
    fn test_invalid_memory_display() {
        let err = PbsDoError::InvalidMemory { mem: 200 };
        assert!(err.to_string().contains("200"));
        assert!(err.to_string().contains("invalid amount of job memory"));
    }

    #[test]
    fn test_missing_arguments_display() {
        let err = PbsDoError::MissingArguments(vec!["a.txt".to_string(), "b.txt".to_string()]);
        assert_eq!(err.to_string(), "arguments do not exist: a.txt, b.txt");
    }

    #[test]
    fn test_invalid_regex_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = PbsDoError::InvalidRegex {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid regex '('"));
    }
}
