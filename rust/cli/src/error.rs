//! Error type shared by every command handler. Any failure maps to exit
//! code 2.

use cardroom_engine::cards::ParseCardError;
use cardroom_engine::errors::{EvalError, GameError};
use cardroom_room::{RoomError, SettingsError};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// File or stream I/O
    Io(std::io::Error),
    /// Bad arguments or unreadable input data
    InvalidInput(String),
    Config(String),
    /// A rule or evaluator refused the request
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

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<RoomError> for CliError {
    fn from(error: RoomError) -> Self {
        CliError::Engine(error.to_rejection().to_string())
    }
}

impl From<EvalError> for CliError {
    fn from(error: EvalError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<ParseCardError> for CliError {
    fn from(error: ParseCardError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(error: SettingsError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_rejections_keep_their_code() {
        let err = CliError::from(RoomError::NotFound("r1".into()));
        assert_eq!(err.to_string(), "Engine error: room_not_found: Room not found: r1");
    }

    #[test]
    fn parse_errors_are_invalid_input() {
        let err = CliError::from(ParseCardError("Zz".into()));
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
