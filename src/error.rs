//! Error types and handling for the `TripScout` engine

use thiserror::Error;

/// Main error type for the `TripScout` application
#[derive(Error, Debug)]
pub enum TripScoutError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors (coordinates out of range, unknown tiers, ...)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Destination storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripScoutError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripScoutError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripScoutError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripScoutError::Storage { .. } => {
                "Destination catalog is currently unavailable. Please try again later.".to_string()
            }
            TripScoutError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            TripScoutError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TripScoutError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TripScoutError::config("missing seed file");
        assert!(matches!(config_err, TripScoutError::Config { .. }));

        let storage_err = TripScoutError::storage("catalog unavailable");
        assert!(matches!(storage_err, TripScoutError::Storage { .. }));

        let validation_err = TripScoutError::validation("invalid coordinates");
        assert!(matches!(validation_err, TripScoutError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TripScoutError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let storage_err = TripScoutError::storage("test");
        assert!(storage_err.user_message().contains("unavailable"));

        let validation_err = TripScoutError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let trip_err: TripScoutError = io_err.into();
        assert!(matches!(trip_err, TripScoutError::Io { .. }));
    }
}
