//! Hand evaluators. Each is a pure function of the cards it is given.

pub mod blackjack;
pub mod poker;
pub mod schwimmen;

pub use blackjack::{value_of, HandValue};
pub use poker::{compare, evaluate, evaluate_cards, Category, PokerHand};
pub use schwimmen::{score, SchwimmenRule, SchwimmenScore};

use crate::cards::Card;
use crate::errors::EvalError;

fn ensure_standard(cards: &[Card]) -> Result<(), EvalError> {
    match cards.iter().find(|c| !c.is_standard()) {
        Some(c) => Err(EvalError::ForeignCard(c.to_string())),
        None => Ok(()),
    }
}
