use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Rank, Suit};
use crate::player::PlayerId;

/// A move proposed by a player. Each variant carries only the fields its
/// game needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Play cards from hand (UNO: exactly one card; Bullshit: one to four,
    /// face down, with a claimed rank)
    Play {
        cards: Vec<CardId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        chosen_color: Option<Suit>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        claimed_rank: Option<Rank>,
    },
    /// UNO: take the pending draw stack, or one card
    Draw,
    /// Poker: put `amount` more chips in
    Bet { amount: u32 },
    Fold,
    Check,
    Hit,
    Stand,
    Double,
    /// Schwimmen: exchange one card (both indices) or the whole hand (neither)
    Swap {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hand_index: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_index: Option<usize>,
    },
    Knock,
    /// Bullshit: dispute the previous claim
    Challenge,
}

impl Action {
    pub fn play(card: CardId) -> Self {
        Action::Play {
            cards: vec![card],
            chosen_color: None,
            claimed_rank: None,
        }
    }

    pub fn play_wild(card: CardId, color: Suit) -> Self {
        Action::Play {
            cards: vec![card],
            chosen_color: Some(color),
            claimed_rank: None,
        }
    }

    pub fn claim(cards: Vec<CardId>, rank: Rank) -> Self {
        Action::Play {
            cards,
            chosen_color: None,
            claimed_rank: Some(rank),
        }
    }

    pub fn swap_one(hand_index: usize, table_index: usize) -> Self {
        Action::Swap {
            hand_index: Some(hand_index),
            table_index: Some(table_index),
        }
    }

    pub fn swap_all() -> Self {
        Action::Swap {
            hand_index: None,
            table_index: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Play { .. } => "play",
            Action::Draw => "draw",
            Action::Bet { .. } => "bet",
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Hit => "hit",
            Action::Stand => "stand",
            Action::Double => "double",
            Action::Swap { .. } => "swap",
            Action::Knock => "knock",
            Action::Challenge => "challenge",
        }
    }
}

/// Wire shape of an action: `{"type": ..., "player_id": ..., ...fields}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub player_id: PlayerId,
    #[serde(flatten)]
    pub action: Action,
}
