//! Error types for the CLI application.
//!
//! Engine errors arrive as typed `thiserror` values and are folded into
//! [`CliError`] so every command handler can use `?`.

use std::fmt;

use quickdraw_engine::errors::{CardParseError, GateError, SessionError, SynthesisError};

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::Engine(error)
    }
}

impl From<&str> for CliError {
    fn from(error: &str) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<CardParseError> for CliError {
    fn from(error: CardParseError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<SynthesisError> for CliError {
    fn from(error: SynthesisError) -> Self {
        match error {
            SynthesisError::UnknownCategory(_) => CliError::InvalidInput(error.to_string()),
            SynthesisError::Unavailable { .. } => CliError::Engine(error.to_string()),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(error: SessionError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<GateError> for CliError {
    fn from(error: GateError) -> Self {
        CliError::Engine(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickdraw_engine::hand::HandCategory;

    #[test]
    fn card_errors_are_user_input() {
        let e: CliError = "Zz".parse::<quickdraw_engine::cards::Card>().unwrap_err().into();
        assert!(matches!(e, CliError::InvalidInput(_)));
        assert!(e.to_string().starts_with("Invalid input:"));
    }

    #[test]
    fn unavailable_hand_is_an_engine_error() {
        let e: CliError = SynthesisError::Unavailable {
            category: HandCategory::Flush,
        }
        .into();
        assert!(matches!(e, CliError::Engine(_)));
        assert!(e.to_string().contains("Flush"));
    }

    #[test]
    fn gate_errors_keep_their_message() {
        let e: CliError = GateError::Session(SessionError::HandIncomplete { held: 3 }).into();
        assert_eq!(e.to_string(), "Engine error: Hand incomplete: 3 of 5 cards held");
    }
}
