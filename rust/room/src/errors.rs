//! Rejection reporting for the room gate.
//!
//! Every failure of [`RoomError`] is recoverable: the room's state is left as
//! it was, and the transport can forward [`Rejection`] to the client that
//! sent the action.
use cardroom_engine::errors::GameError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;

use crate::rooms::RoomId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("{0}")]
    Rejected(#[from] GameError),
    #[error("Room not found: {0}")]
    NotFound(RoomId),
    #[error("No round has been started in room {0}")]
    NoRound(RoomId),
    #[error("Room expired: {0}")]
    Expired(RoomId),
    #[error("Room storage poisoned")]
    StoragePoisoned,
    #[error("Invalid seats: {0}")]
    InvalidSeats(String),
}

impl RoomError {
    /// Machine-readable code; engine rejections keep their own code.
    pub fn code(&self) -> &'static str {
        match self {
            RoomError::Rejected(e) => e.code(),
            RoomError::NotFound(_) => "room_not_found",
            RoomError::NoRound(_) => "no_round",
            RoomError::Expired(_) => "room_expired",
            RoomError::StoragePoisoned => "storage_poisoned",
            RoomError::InvalidSeats(_) => "invalid_seats",
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RoomError::Rejected(GameError::InvalidTurn { expected, actual }) => Some(json!({
                "expected": expected,
                "actual": actual,
            })),
            RoomError::Rejected(GameError::InsufficientCards {
                requested,
                available,
            }) => Some(json!({
                "requested": requested,
                "available": available,
            })),
            RoomError::NotFound(id) | RoomError::NoRound(id) | RoomError::Expired(id) => {
                Some(json!({ "room_id": id }))
            }
            _ => None,
        }
    }

    pub fn to_rejection(&self) -> Rejection {
        Rejection {
            error: self.code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

/// Serializable reason handed back to the client whose action was refused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rejection {
    /// Machine-readable error code (e.g., "invalid_turn")
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_rejections_keep_their_code() {
        let err = RoomError::from(GameError::InvalidTurn {
            expected: "a".into(),
            actual: "b".into(),
        });
        let rejection = err.to_rejection();
        assert_eq!(rejection.error, "invalid_turn");
        assert_eq!(rejection.message, "It's not player b's turn (expected player a)");
        let details = rejection.details.expect("details");
        assert_eq!(details["expected"], "a");
        assert_eq!(details["actual"], "b");
    }

    #[test]
    fn room_errors_have_codes() {
        assert_eq!(RoomError::NotFound("r".into()).code(), "room_not_found");
        assert_eq!(RoomError::NoRound("r".into()).code(), "no_round");
        assert_eq!(RoomError::Expired("r".into()).code(), "room_expired");
        assert_eq!(RoomError::StoragePoisoned.code(), "storage_poisoned");
        assert_eq!(RoomError::InvalidSeats("x".into()).code(), "invalid_seats");
    }

    #[test]
    fn rejection_serializes_without_empty_details() {
        let rejection = RoomError::StoragePoisoned.to_rejection();
        let json = serde_json::to_value(&rejection).unwrap();
        assert_eq!(json["error"], "storage_poisoned");
        assert!(json.get("details").is_none());
        assert_eq!(rejection.to_string(), "storage_poisoned: Room storage poisoned");
    }
}
