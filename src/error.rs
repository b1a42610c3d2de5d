use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating, storing or serving recipes.
///
/// Parsing a generator response never produces one of these: missing fields
/// fall back to defaults instead.
#[derive(Error, Debug)]
pub enum GuacoError {
    /// HTTP transport failure talking to a generative service
    #[error("Failed to reach generation service: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The generative service failed or returned an unusable reply
    #[error("Recipe generation failed: {0}")]
    GenerationError(String),

    /// Request input rejected before any work was done
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Recipe store file could not be read or written
    #[error("Recipe store I/O error at {}: {source}", .path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recipe store file exists but is not valid JSON
    #[error("Recipe store at {} is corrupt: {source}", .path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic I/O error (binding the server, reading input files)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl GuacoError {
    /// Whether the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GuacoError::InvalidInput(_) | GuacoError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GuacoError::InvalidInput("At least one ingredient is required".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: At least one ingredient is required"
        );
        assert!(err.is_client_error());

        let err = GuacoError::GenerationError("All providers failed".to_string());
        assert!(err.to_string().contains("All providers failed"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_corrupt_store_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = GuacoError::CorruptStore {
            path: PathBuf::from("data/recipes.json"),
            source,
        };
        assert!(err.to_string().contains("data/recipes.json"));
    }
}
