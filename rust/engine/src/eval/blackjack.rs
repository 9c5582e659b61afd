use serde::{Deserialize, Serialize};

use super::ensure_standard;
use crate::cards::{Card, Rank};
use crate::errors::EvalError;
use crate::game::GameKind;

pub const BLACKJACK: u32 = 21;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandValue {
    pub value: u32,
    /// At least one ace is still counted as 11
    pub is_soft: bool,
    pub is_bust: bool,
    /// Exactly two cards totalling 21
    pub is_blackjack: bool,
}

/// Totals a blackjack hand. Aces start at 11 and are demoted to 1 one at a
/// time while the total is over 21.
///
/// ```
/// use cardroom_engine::cards::parse_cards;
/// use cardroom_engine::eval::value_of;
///
/// let v = value_of(&parse_cards("As Ah 9d").unwrap()).unwrap();
/// assert_eq!(v.value, 21);
/// assert!(!v.is_bust);
/// ```
pub fn value_of(hand: &[Card]) -> Result<HandValue, EvalError> {
    ensure_standard(hand)?;
    let mut value: u32 = hand.iter().map(|c| c.value_in(GameKind::Blackjack)).sum();
    let mut soft_aces = hand.iter().filter(|c| c.rank == Rank::Ace).count();
    while value > BLACKJACK && soft_aces > 0 {
        value -= 10;
        soft_aces -= 1;
    }
    Ok(HandValue {
        value,
        is_soft: soft_aces > 0,
        is_bust: value > BLACKJACK,
        is_blackjack: hand.len() == 2 && value == BLACKJACK,
    })
}
