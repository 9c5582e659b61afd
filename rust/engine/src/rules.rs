use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Optional house rules a room can toggle before a round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// UNO: a pending draw stack may be answered with another draw card
    pub uno_stacking: bool,
    /// Schwimmen: three aces score 33
    pub schwimmen_three_aces: bool,
    /// Schwimmen: three sevens ("Feuer") end the round on the spot
    pub schwimmen_fire_ends_round: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            uno_stacking: true,
            schwimmen_three_aces: true,
            schwimmen_fire_ends_round: false,
        }
    }
}

/// Parameters fixed for the lifetime of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Chips each seat starts a poker or blackjack round with
    pub starting_chips: u32,
    /// Blackjack wager placed by every seat when the round begins
    pub blackjack_bet: u32,
    pub rules: RuleOptions,
    /// Shuffle the discard pile back into an exhausted draw pile
    pub reshuffle_discard: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            starting_chips: 1000,
            blackjack_bet: 10,
            rules: RuleOptions::default(),
            reshuffle_discard: true,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_chips == 0 {
            return Err(GameError::malformed("starting_chips must be positive"));
        }
        if self.blackjack_bet == 0 || self.blackjack_bet > self.starting_chips {
            return Err(GameError::malformed(
                "blackjack_bet must be between 1 and starting_chips",
            ));
        }
        Ok(())
    }
}

/// Outcome of a poker bet that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedBet {
    /// Matches the current bet exactly
    Call(u32),
    /// Pushes the current bet higher
    Raise(u32),
    /// Commits every remaining chip, possibly short of a call
    AllIn(u32),
}

impl ValidatedBet {
    pub fn amount(self) -> u32 {
        match self {
            ValidatedBet::Call(a) | ValidatedBet::Raise(a) | ValidatedBet::AllIn(a) => a,
        }
    }
}

/// Validates a poker bet of `amount` additional chips.
///
/// `committed` is what the player already has in front of them this street
/// and `current_bet` is the highest commitment at the table. A bet must add
/// chips, may not exceed the stack, and must at least match the current bet
/// unless it puts the player all-in.
///
/// # Errors
///
/// - [`GameError::MalformedAction`] for a zero amount
/// - [`GameError::IllegalAction`] when the stack is too small or the bet
///   falls short of a call without being all-in
///
/// # Examples
///
/// ```
/// use cardroom_engine::rules::{validate_bet, ValidatedBet};
///
/// assert_eq!(validate_bet(1000, 0, 50, 50), Ok(ValidatedBet::Call(50)));
/// assert_eq!(validate_bet(1000, 50, 50, 100), Ok(ValidatedBet::Raise(100)));
/// assert_eq!(validate_bet(30, 0, 50, 30), Ok(ValidatedBet::AllIn(30)));
/// assert!(validate_bet(1000, 0, 50, 20).is_err());
/// ```
pub fn validate_bet(
    stack: u32,
    committed: u32,
    current_bet: u32,
    amount: u32,
) -> Result<ValidatedBet, GameError> {
    if amount == 0 {
        return Err(GameError::malformed("bet amount must be positive"));
    }
    if amount > stack {
        return Err(GameError::illegal(format!(
            "bet of {amount} exceeds stack of {stack}"
        )));
    }
    let total = committed.saturating_add(amount);
    if amount == stack {
        return Ok(ValidatedBet::AllIn(amount));
    }
    match total.cmp(&current_bet) {
        std::cmp::Ordering::Less => Err(GameError::illegal(format!(
            "bet of {amount} does not match the current bet of {current_bet}"
        ))),
        std::cmp::Ordering::Equal => Ok(ValidatedBet::Call(amount)),
        std::cmp::Ordering::Greater => Ok(ValidatedBet::Raise(amount)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_house_rules() {
        let cfg = RoundConfig::default();
        assert_eq!(cfg.starting_chips, 1000);
        assert!(cfg.rules.uno_stacking);
        assert!(cfg.rules.schwimmen_three_aces);
        assert!(!cfg.rules.schwimmen_fire_ends_round);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: RoundConfig =
            serde_json::from_str(r#"{"starting_chips":500,"rules":{"uno_stacking":false}}"#)
                .unwrap();
        assert_eq!(cfg.starting_chips, 500);
        assert_eq!(cfg.blackjack_bet, 10);
        assert!(!cfg.rules.uno_stacking);
        assert!(cfg.rules.schwimmen_three_aces);
    }

    #[test]
    fn zero_bet_is_malformed() {
        assert_eq!(
            validate_bet(100, 0, 0, 0).unwrap_err().code(),
            "malformed_action"
        );
        assert_eq!(
            validate_bet(100, 0, 0, 101).unwrap_err().code(),
            "illegal_action"
        );
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = RoundConfig {
            blackjack_bet: 0,
            ..RoundConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
