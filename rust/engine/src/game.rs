use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::games::{
    blackjack::BlackjackState, bullshit::BullshitState, poker::PokerState,
    schwimmen::SchwimmenState, uno::UnoState,
};
use crate::player::{Player, PlayerId, Seat};
use crate::rules::RoundConfig;
use crate::turn::TurnTracker;

/// The five supported games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Uno,
    Blackjack,
    Schwimmen,
    /// Texas Hold'em
    Poker,
    Bullshit,
}

impl GameKind {
    pub fn all() -> [GameKind; 5] {
        [
            GameKind::Uno,
            GameKind::Blackjack,
            GameKind::Schwimmen,
            GameKind::Poker,
            GameKind::Bullshit,
        ]
    }

    /// Inclusive bounds on the number of seats a round accepts.
    pub fn seat_range(self) -> (usize, usize) {
        match self {
            GameKind::Uno => (2, 10),
            GameKind::Blackjack => (1, 7),
            GameKind::Schwimmen => (2, 9),
            GameKind::Poker => (2, 10),
            GameKind::Bullshit => (2, 8),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::Uno => "uno",
            GameKind::Blackjack => "blackjack",
            GameKind::Schwimmen => "schwimmen",
            GameKind::Poker => "poker",
            GameKind::Bullshit => "bullshit",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uno" => Ok(GameKind::Uno),
            "blackjack" => Ok(GameKind::Blackjack),
            "schwimmen" => Ok(GameKind::Schwimmen),
            "poker" | "holdem" => Ok(GameKind::Poker),
            "bullshit" => Ok(GameKind::Bullshit),
            other => Err(format!("unknown game: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Waiting,
    Playing,
    Finished,
}

/// Game-specific transient state, one shape per game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Variant {
    Uno(UnoState),
    Blackjack(BlackjackState),
    Schwimmen(SchwimmenState),
    Poker(PokerState),
    Bullshit(BullshitState),
}

/// The authoritative snapshot of one round.
///
/// While `status` is `Playing`, `turn.current` indexes an active player.
/// Once `Finished`, no further action is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game: GameKind,
    pub players: Vec<Player>,
    pub turn: TurnTracker,
    pub deck: Deck,
    /// Discard pile (UNO, Bullshit), open table cards (Schwimmen) or the
    /// board (poker); the top card is last
    pub pile: Vec<Card>,
    pub round: u32,
    pub status: GameStatus,
    /// Set when the round finishes. A Blackjack round can finish with
    /// `None` when the dealer beats every seat.
    pub winner: Option<PlayerId>,
    pub config: RoundConfig,
    pub variant: Variant,
}

impl GameState {
    /// Seats the players around a fresh deck. Hands are dealt by the game
    /// module afterwards.
    pub(crate) fn seated(
        game: GameKind,
        seats: &[Seat],
        config: RoundConfig,
        round: u32,
        deck: Deck,
        variant: Variant,
    ) -> Result<Self, GameError> {
        let (min, max) = game.seat_range();
        if seats.len() < min || seats.len() > max {
            return Err(GameError::malformed(format!(
                "{game} needs {min} to {max} players, got {}",
                seats.len()
            )));
        }
        for (i, seat) in seats.iter().enumerate() {
            if seats[..i].iter().any(|s| s.id == seat.id) {
                return Err(GameError::malformed(format!("duplicate player id {}", seat.id)));
            }
        }
        config.validate()?;
        let chips = match game {
            GameKind::Poker | GameKind::Blackjack => config.starting_chips,
            _ => 0,
        };
        Ok(Self {
            game,
            players: seats.iter().map(|s| Player::from_seat(s, chips)).collect(),
            turn: TurnTracker::new(0),
            deck,
            pile: Vec::new(),
            round,
            status: GameStatus::Playing,
            winner: None,
            config,
            variant,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn current_player(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Playing => self.players.get(self.turn.current),
            _ => None,
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    pub fn top_of_pile(&self) -> Option<&Card> {
        self.pile.last()
    }

    /// Confirms `id` may act now and returns their seat index.
    pub fn require_turn(&self, id: &PlayerId) -> Result<usize, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::illegal("round is not in play"));
        }
        let current = self
            .players
            .get(self.turn.current)
            .ok_or(GameError::NoActivePlayers)?;
        if &current.id != id {
            return Err(GameError::InvalidTurn {
                expected: current.id.to_string(),
                actual: id.to_string(),
            });
        }
        Ok(self.turn.current)
    }

    /// Draws from the deck, first recycling the discard pile (all but its
    /// top card) when the deck runs short and the round allows it.
    pub fn draw_cards<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, GameError> {
        if count > self.deck.len() && self.config.reshuffle_discard && self.pile.len() > 1 {
            let top = self.pile.len() - 1;
            let recycled: Vec<Card> = self.pile.drain(..top).collect();
            self.deck.refill(recycled, rng);
        }
        self.deck.draw(count)
    }

    /// Deals `count` cards to every player, one player at a time.
    pub(crate) fn deal_each(&mut self, count: usize) -> Result<(), GameError> {
        for i in 0..self.players.len() {
            let cards = self.deck.draw(count)?;
            self.players[i].hand.extend(cards);
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self, winner: Option<PlayerId>) {
        self.status = GameStatus::Finished;
        self.winner = winner;
    }
}
