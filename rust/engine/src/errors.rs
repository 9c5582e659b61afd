use thiserror::Error;

/// Reasons an action is refused by a state machine. Every variant is
/// recoverable: the state the action was applied to is left untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    InvalidTurn { expected: String, actual: String },
    #[error("Illegal action: {0}")]
    IllegalAction(String),
    #[error("Card cannot be played: {0}")]
    IllegalCard(String),
    #[error("Not enough cards: requested {requested}, available {available}")]
    InsufficientCards { requested: usize, available: usize },
    #[error("Malformed action: {0}")]
    MalformedAction(String),
    #[error("No active players remain")]
    NoActivePlayers,
}

impl GameError {
    /// Stable machine-readable code for the rejection.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::InvalidTurn { .. } => "invalid_turn",
            GameError::IllegalAction(_) => "illegal_action",
            GameError::IllegalCard(_) => "illegal_card",
            GameError::InsufficientCards { .. } => "insufficient_cards",
            GameError::MalformedAction(_) => "malformed_action",
            GameError::NoActivePlayers => "no_active_players",
        }
    }

    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        GameError::IllegalAction(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        GameError::MalformedAction(msg.into())
    }
}

/// Evaluator input faults. Well-formed hands never produce one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Expected {expected} cards, got {actual}")]
    WrongHandSize { expected: usize, actual: usize },
    #[error("At most {max} cards allowed, got {actual}")]
    TooManyCards { max: usize, actual: usize },
    #[error("Card {0} does not belong to a standard deck")]
    ForeignCard(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_snake_case() {
        assert_eq!(GameError::NoActivePlayers.code(), "no_active_players");
        assert_eq!(
            GameError::InsufficientCards {
                requested: 3,
                available: 1
            }
            .code(),
            "insufficient_cards"
        );
        assert_eq!(GameError::illegal("hit after stand").code(), "illegal_action");
    }

    #[test]
    fn messages_carry_context() {
        let err = GameError::InvalidTurn {
            expected: "p1".into(),
            actual: "p2".into(),
        };
        assert_eq!(err.to_string(), "It's not player p2's turn (expected player p1)");
    }
}
