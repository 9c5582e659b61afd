use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::game::GameKind;

/// Represents the suit of a card.
/// The four traditional suits make up the standard 52-card deck; the four
/// colors and `Wild` only ever appear in an UNO deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
    /// UNO red
    Red,
    /// UNO blue
    Blue,
    /// UNO green
    Green,
    /// UNO yellow
    Yellow,
    /// Suit-less UNO cards (wild, draw four)
    Wild,
}

impl Suit {
    pub fn is_traditional(self) -> bool {
        matches!(
            self,
            Suit::Clubs | Suit::Diamonds | Suit::Hearts | Suit::Spades
        )
    }

    pub fn is_uno_color(self) -> bool {
        matches!(self, Suit::Red | Suit::Blue | Suit::Green | Suit::Yellow)
    }

    fn symbol(self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
            Suit::Red => "red",
            Suit::Blue => "blue",
            Suit::Green => "green",
            Suit::Yellow => "yellow",
            Suit::Wild => "wild",
        }
    }
}

/// Represents the rank of a card across every supported deck.
/// `Two`..`Ace` form the standard deck; `Zero`..`Nine` plus the action ranks
/// form the UNO deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Skip,
    Reverse,
    #[serde(rename = "draw2")]
    DrawTwo,
    #[serde(rename = "draw4")]
    DrawFour,
    Wild,
}

impl Rank {
    /// Numeric face value for number ranks (`Zero`..`Ten`).
    pub fn number(self) -> Option<u8> {
        let n = match self {
            Rank::Zero => 0,
            Rank::One => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            _ => return None,
        };
        Some(n)
    }

    pub fn from_number(v: u8) -> Option<Rank> {
        let r = match v {
            0 => Rank::Zero,
            1 => Rank::One,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            _ => return None,
        };
        Some(r)
    }

    /// True for the thirteen ranks of the standard deck.
    pub fn is_standard(self) -> bool {
        self >= Rank::Two && self <= Rank::Ace
    }

    pub fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn is_uno_action(self) -> bool {
        matches!(
            self,
            Rank::Skip | Rank::Reverse | Rank::DrawTwo | Rank::DrawFour | Rank::Wild
        )
    }

    /// Ace-high ordinal (2..=14) used for poker comparisons; zero outside the
    /// standard deck.
    pub fn high_value(self) -> u8 {
        match self {
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
            r if r.is_standard() => r.number().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn from_high_value(v: u8) -> Option<Rank> {
        match v {
            2..=10 => Rank::from_number(v),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Rank::Zero => "0",
            Rank::One => "1",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Skip => "skip",
            Rank::Reverse => "reverse",
            Rank::DrawTwo => "+2",
            Rank::DrawFour => "+4",
            Rank::Wild => "wild",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Stable identity of a physical card within one deck.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents a single immutable card.
/// `face_up` is presentation state only; no rule ever reads it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique within the deck the card was built into
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    #[serde(default)]
    pub face_up: bool,
}

impl Card {
    pub fn new(id: u16, suit: Suit, rank: Rank) -> Self {
        Self {
            id: CardId(id),
            suit,
            rank,
            face_up: false,
        }
    }

    /// Builds a standard-deck card with its canonical id (suit-major,
    /// `Two` first), the same id the 52-card deck assigns.
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        let suit_idx = standard_suits()
            .iter()
            .position(|s| *s == suit)
            .unwrap_or(0) as u16;
        let rank_idx = standard_ranks()
            .iter()
            .position(|r| *r == rank)
            .unwrap_or(0) as u16;
        Card::new(suit_idx * 13 + rank_idx, suit, rank)
    }

    pub fn is_standard(&self) -> bool {
        self.suit.is_traditional() && self.rank.is_standard()
    }

    pub fn is_wild(&self) -> bool {
        self.suit == Suit::Wild
    }

    pub fn revealed(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub fn concealed(mut self) -> Self {
        self.face_up = false;
        self
    }

    /// The card's numeric worth inside a particular game's scoring.
    pub fn value_in(&self, game: GameKind) -> u32 {
        match game {
            GameKind::Blackjack => match self.rank {
                Rank::Ace => 11,
                r if r.is_face() => 10,
                r => u32::from(r.number().unwrap_or(0)),
            },
            GameKind::Schwimmen => match self.rank {
                Rank::Jack => 11,
                Rank::Queen => 12,
                Rank::King => 13,
                Rank::Ace => 11,
                r => u32::from(r.number().unwrap_or(0)),
            },
            GameKind::Uno => match self.rank {
                Rank::DrawTwo => 2,
                Rank::DrawFour => 4,
                r => u32::from(r.number().unwrap_or(0)),
            },
            GameKind::Poker | GameKind::Bullshit => u32::from(self.rank.high_value()),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suit.is_traditional() {
            write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
        } else if self.suit == Suit::Wild {
            match self.rank {
                Rank::DrawFour => write!(f, "wild +4"),
                _ => write!(f, "wild"),
            }
        } else {
            write!(f, "{} {}", self.suit.symbol(), self.rank.symbol())
        }
    }
}

/// Error returned when card notation cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card notation: {0}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses standard-deck notation: rank (`2`-`10`, `T`, `J`, `Q`, `K`, `A`)
    /// followed by a suit letter (`c`, `d`, `h`, `s`) or symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s
            .chars()
            .last()
            .ok_or_else(|| ParseCardError(s.to_string()))?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let suit = match suit_char {
            'c' | 'C' | '♣' => Suit::Clubs,
            'd' | 'D' | '♦' => Suit::Diamonds,
            'h' | 'H' | '♥' => Suit::Hearts,
            's' | 'S' | '♠' => Suit::Spades,
            _ => return Err(ParseCardError(s.to_string())),
        };
        let rank = match rank_part.to_ascii_uppercase().as_str() {
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            n => n
                .parse::<u8>()
                .ok()
                .filter(|v| (2..=9).contains(v))
                .and_then(Rank::from_number)
                .ok_or_else(|| ParseCardError(s.to_string()))?,
        };
        Ok(Card::standard(suit, rank))
    }
}

/// Parses whitespace- or comma-separated standard card notation.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn standard_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn uno_colors() -> [Suit; 4] {
    [Suit::Red, Suit::Blue, Suit::Green, Suit::Yellow]
}

pub fn standard_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_notation() {
        let c: Card = "As".parse().unwrap();
        assert_eq!((c.suit, c.rank), (Suit::Spades, Rank::Ace));
        let c: Card = "10h".parse().unwrap();
        assert_eq!((c.suit, c.rank), (Suit::Hearts, Rank::Ten));
        let c: Card = "Td".parse().unwrap();
        assert_eq!(c.rank, Rank::Ten);
        assert!("1s".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn canonical_ids_are_unique() {
        let mut ids = std::collections::HashSet::new();
        for s in standard_suits() {
            for r in standard_ranks() {
                assert!(ids.insert(Card::standard(s, r).id));
            }
        }
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn game_values_follow_each_scoring_table() {
        let king = Card::standard(Suit::Hearts, Rank::King);
        assert_eq!(king.value_in(GameKind::Blackjack), 10);
        assert_eq!(king.value_in(GameKind::Schwimmen), 13);
        assert_eq!(king.value_in(GameKind::Poker), 13);
        let draw_four = Card::new(0, Suit::Wild, Rank::DrawFour);
        assert_eq!(draw_four.value_in(GameKind::Uno), 4);
    }

    #[test]
    fn rank_serializes_with_uno_names() {
        let json = serde_json::to_string(&Rank::DrawTwo).unwrap();
        assert_eq!(json, "\"draw2\"");
        let back: Rank = serde_json::from_str("\"draw4\"").unwrap();
        assert_eq!(back, Rank::DrawFour);
    }
}
