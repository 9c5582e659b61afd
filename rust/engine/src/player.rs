use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::errors::GameError;

/// Opaque player identity supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn connected_default() -> bool {
    true
}

/// A participant as the session layer knows them, before any cards are dealt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default = "connected_default")]
    pub connected: bool,
}

impl Seat {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
            is_host: false,
            connected: true,
        }
    }

    pub fn host(mut self) -> Self {
        self.is_host = true;
        self
    }
}

/// A seated player with the per-round fields every game layers on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_host: bool,
    pub connected: bool,
    /// Cards held; only the state machine mutates this
    pub hand: Vec<Card>,
    /// Chip stack (poker and blackjack)
    pub chips: u32,
    /// Chips committed during the current betting round or blackjack wager
    pub bet: u32,
    pub folded: bool,
    pub eliminated: bool,
}

impl Player {
    pub fn from_seat(seat: &Seat, chips: u32) -> Self {
        Self {
            id: seat.id.clone(),
            name: seat.name.clone(),
            is_host: seat.is_host,
            connected: seat.connected,
            hand: Vec::new(),
            chips,
            bet: 0,
            folded: false,
            eliminated: false,
        }
    }

    /// Neither folded nor eliminated.
    pub fn is_active(&self) -> bool {
        !self.folded && !self.eliminated
    }

    pub fn holds(&self, id: CardId) -> bool {
        self.hand.iter().any(|c| c.id == id)
    }

    /// Removes the listed cards from the hand, in the order given. Fails
    /// without touching the hand if any id is missing or repeated.
    pub fn take_cards(&mut self, ids: &[CardId]) -> Result<Vec<Card>, GameError> {
        for (i, id) in ids.iter().enumerate() {
            if ids[..i].contains(id) {
                return Err(GameError::malformed(format!("card {id} listed twice")));
            }
            if !self.holds(*id) {
                return Err(GameError::IllegalCard(format!("card {id} is not in hand")));
            }
        }
        let mut taken = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(pos) = self.hand.iter().position(|c| c.id == *id) {
                taken.push(self.hand.remove(pos));
            }
        }
        Ok(taken)
    }

    /// Moves chips from the stack into the current bet.
    pub fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(GameError::illegal(format!(
                "{} has only {} chips",
                self.id, self.chips
            )));
        }
        self.chips -= amount;
        self.bet += amount;
        Ok(())
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn player_with(cards: &[Card]) -> Player {
        let mut p = Player::from_seat(&Seat::new("p1", "Ada"), 100);
        p.hand = cards.to_vec();
        p
    }

    #[test]
    fn take_cards_is_atomic() {
        let a = Card::standard(Suit::Spades, Rank::Ace);
        let k = Card::standard(Suit::Hearts, Rank::King);
        let mut p = player_with(&[a, k]);
        let missing = Card::standard(Suit::Clubs, Rank::Two).id;
        assert!(p.take_cards(&[a.id, missing]).is_err());
        assert_eq!(p.hand.len(), 2);
        assert!(p.take_cards(&[a.id, a.id]).is_err());
        let taken = p.take_cards(&[k.id]).unwrap();
        assert_eq!(taken, vec![k]);
        assert_eq!(p.hand, vec![a]);
    }

    #[test]
    fn commit_moves_chips_to_bet() {
        let mut p = player_with(&[]);
        p.commit(40).unwrap();
        assert_eq!((p.chips, p.bet), (60, 40));
        assert!(p.commit(61).is_err());
        assert_eq!((p.chips, p.bet), (60, 40));
    }

    #[test]
    fn seat_defaults_to_connected() {
        let seat: Seat = serde_json::from_str(r#"{"id":"a","name":"A"}"#).unwrap();
        assert!(seat.connected);
        assert!(!seat.is_host);
    }
}
