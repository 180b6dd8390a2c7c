//! # Error Types Module
//!
//! This module defines the error types for the fallible edges of the engine:
//! loading recipe input and reading configuration. Consolidation itself never
//! fails; unreadable ingredients degrade to defaults instead.

/// Custom error types for input loading and configuration
#[derive(Debug)]
pub enum GroceryError {
    /// Reading the input failed
    Io(std::io::Error),
    /// The input is not a recipe list
    InvalidInput(String),
    /// A configuration value could not be used
    Config(String),
}

impl std::fmt::Display for GroceryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroceryError::Io(err) => write!(f, "I/O error: {err}"),
            GroceryError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            GroceryError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for GroceryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GroceryError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GroceryError {
    fn from(err: std::io::Error) -> Self {
        GroceryError::Io(err)
    }
}

impl From<serde_json::Error> for GroceryError {
    fn from(err: serde_json::Error) -> Self {
        GroceryError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = GroceryError::Config("bad merge policy".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad merge policy");

        let err = GroceryError::InvalidInput("expected an array".to_string());
        assert_eq!(err.to_string(), "Invalid input: expected an array");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: GroceryError = io.into();
        assert!(matches!(err, GroceryError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_json_error_is_invalid_input() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err: GroceryError = json_err.into();
        assert!(matches!(err, GroceryError::InvalidInput(_)));
    }
}
