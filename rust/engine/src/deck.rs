use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{standard_ranks, standard_suits, uno_colors, Card, Rank, Suit};
use crate::errors::GameError;
use crate::game::GameKind;

/// Number of cards in a standard deck.
pub const STANDARD_DECK_SIZE: usize = 52;
/// Number of cards in an UNO deck.
pub const UNO_DECK_SIZE: usize = 108;

/// An ordered draw pile, consumed from the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the complete deck for `game` and shuffles it with `rng`.
    pub fn build<R: Rng + ?Sized>(game: GameKind, rng: &mut R) -> Self {
        let mut deck = Self::unshuffled(game);
        deck.shuffle(rng);
        deck
    }

    /// The complete deck for `game` in construction order.
    pub fn unshuffled(game: GameKind) -> Self {
        let cards = match game {
            GameKind::Uno => uno_cards(),
            _ => standard_cards(),
        };
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        fisher_yates(&mut self.cards, rng);
    }

    /// Removes `count` cards from the head. Either every requested card is
    /// drawn or the deck is left untouched.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, GameError> {
        if count > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: count,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        let mut drawn = self.draw(1)?;
        drawn.pop().ok_or(GameError::InsufficientCards {
            requested: 1,
            available: 0,
        })
    }

    /// Discards the head card face down.
    pub fn burn(&mut self) -> Result<Card, GameError> {
        self.draw_one()
    }

    pub fn put_bottom(&mut self, card: Card) {
        self.cards.push(card.concealed());
    }

    /// Adds `cards` to the deck and reshuffles the whole pile.
    pub fn refill<R: Rng + ?Sized>(&mut self, cards: Vec<Card>, rng: &mut R) {
        self.cards.extend(cards.into_iter().map(Card::concealed));
        self.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Single-pass Fisher-Yates: walk from the last index down, swapping each
/// slot with a uniformly chosen index at or before it.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

fn standard_cards() -> Vec<Card> {
    let mut v = Vec::with_capacity(STANDARD_DECK_SIZE);
    for s in standard_suits() {
        for r in standard_ranks() {
            v.push(Card::standard(s, r));
        }
    }
    v
}

fn uno_cards() -> Vec<Card> {
    let mut v: Vec<Card> = Vec::with_capacity(UNO_DECK_SIZE);
    let push = |v: &mut Vec<Card>, suit: Suit, rank: Rank| {
        let id = v.len() as u16;
        v.push(Card::new(id, suit, rank));
    };
    for color in uno_colors() {
        push(&mut v, color, Rank::Zero);
        for n in 1..=9 {
            if let Some(rank) = Rank::from_number(n) {
                push(&mut v, color, rank);
                push(&mut v, color, rank);
            }
        }
        for rank in [Rank::Skip, Rank::Reverse, Rank::DrawTwo] {
            push(&mut v, color, rank);
            push(&mut v, color, rank);
        }
    }
    for _ in 0..4 {
        push(&mut v, Suit::Wild, Rank::Wild);
    }
    for _ in 0..4 {
        push(&mut v, Suit::Wild, Rank::DrawFour);
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn draw_is_all_or_nothing() {
        let mut deck = Deck::unshuffled(GameKind::Poker);
        let err = deck.draw(53).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientCards {
                requested: 53,
                available: 52
            }
        );
        assert_eq!(deck.len(), 52);
        assert_eq!(deck.draw(52).unwrap().len(), 52);
        assert!(deck.is_empty());
        assert!(deck.draw_one().is_err());
    }

    #[test]
    fn refill_keeps_cards() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let mut deck = Deck::build(GameKind::Uno, &mut rng);
        let drawn = deck.draw(100).unwrap();
        deck.refill(drawn, &mut rng);
        assert_eq!(deck.len(), UNO_DECK_SIZE);
    }

    #[test]
    fn fisher_yates_handles_tiny_slices() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        fisher_yates(&mut empty, &mut rng);
        let mut one = [7u8];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, [7]);
    }
}
