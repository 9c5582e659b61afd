use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ensure_standard;
use crate::cards::{standard_suits, Card, Rank};
use crate::errors::EvalError;

const HOLE_CARDS: usize = 2;
const MAX_COMMUNITY: usize = 5;
const HAND_SIZE: usize = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::HighCard => "high card",
            Category::OnePair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
            Category::RoyalFlush => "royal flush",
        };
        f.write_str(s)
    }
}

/// The best five-card hand found for a player.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PokerHand {
    pub category: Category,
    /// Tie-break ranks, most significant first (2..=14, 0 when unused)
    pub kickers: [u8; 5],
    /// Category and kickers packed so that a larger value is a better hand
    pub strength: u32,
    pub best: Vec<Card>,
}

/// Scores hole cards plus the board.
///
/// Every five-card subset of the combined cards is scored and the strongest
/// is kept. Before the flop (fewer than five cards in total) the available
/// cards are scored directly, which can only produce pairs, trips or quads.
///
/// # Examples
///
/// ```
/// use cardroom_engine::cards::parse_cards;
/// use cardroom_engine::eval::{evaluate, Category};
///
/// let hole = parse_cards("As Ah").unwrap();
/// let board = parse_cards("Ad Ac Ks 2h 3d").unwrap();
/// let hand = evaluate(&hole, &board).unwrap();
/// assert_eq!(hand.category, Category::FourOfAKind);
/// assert_eq!(hand.kickers[..2], [14, 13]);
/// ```
pub fn evaluate(hole: &[Card], community: &[Card]) -> Result<PokerHand, EvalError> {
    if hole.len() != HOLE_CARDS {
        return Err(EvalError::WrongHandSize {
            expected: HOLE_CARDS,
            actual: hole.len(),
        });
    }
    if community.len() > MAX_COMMUNITY {
        return Err(EvalError::TooManyCards {
            max: MAX_COMMUNITY,
            actual: community.len(),
        });
    }
    let mut all = Vec::with_capacity(hole.len() + community.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(community);
    evaluate_cards(&all)
}

/// Best hand from between one and seven loose cards.
pub fn evaluate_cards(cards: &[Card]) -> Result<PokerHand, EvalError> {
    let max = HOLE_CARDS + MAX_COMMUNITY;
    if cards.is_empty() {
        return Err(EvalError::WrongHandSize {
            expected: HAND_SIZE,
            actual: 0,
        });
    }
    if cards.len() > max {
        return Err(EvalError::TooManyCards {
            max,
            actual: cards.len(),
        });
    }
    ensure_standard(cards)?;

    if cards.len() <= HAND_SIZE {
        return Ok(score_subset(cards));
    }
    let mut best: Option<PokerHand> = None;
    for_each_combination(cards.len(), HAND_SIZE, |idx| {
        let subset: Vec<Card> = idx.iter().map(|&i| cards[i]).collect();
        let hand = score_subset(&subset);
        if best.as_ref().is_none_or(|b| hand.strength > b.strength) {
            best = Some(hand);
        }
    });
    best.ok_or(EvalError::WrongHandSize {
        expected: HAND_SIZE,
        actual: cards.len(),
    })
}

pub fn compare(a: &PokerHand, b: &PokerHand) -> Ordering {
    a.strength.cmp(&b.strength)
}

/// Calls `f` with every ascending `k`-index subset of `0..n`.
fn for_each_combination(n: usize, k: usize, mut f: impl FnMut(&[usize])) {
    if k > n {
        return;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        f(&idx);
        // rightmost index that can still move up
        let mut i = k;
        while i > 0 && idx[i - 1] == n - k + i - 1 {
            i -= 1;
        }
        if i == 0 {
            return;
        }
        idx[i - 1] += 1;
        for j in i..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

fn score_subset(cards: &[Card]) -> PokerHand {
    let mut rank_counts = [0u8; 15];
    let mut mask: u16 = 0;
    for c in cards {
        let r = c.rank.high_value();
        rank_counts[r as usize] += 1;
        mask |= 1 << r;
    }

    let full = cards.len() == HAND_SIZE;
    let flush = full && standard_suits().iter().any(|s| cards.iter().all(|c| c.suit == *s));
    let straight = if full { straight_high_from_mask(mask) } else { None };

    let groups = grouped_ranks(&rank_counts);
    let counts: Vec<u8> = groups.iter().map(|(n, _)| *n).collect();

    let (category, kickers) = match (straight, flush) {
        (Some(14), true) => (Category::RoyalFlush, [14, 0, 0, 0, 0]),
        (Some(high), true) => (Category::StraightFlush, [high, 0, 0, 0, 0]),
        _ if counts.first() == Some(&4) => (Category::FourOfAKind, group_kickers(&groups)),
        _ if counts.starts_with(&[3, 2]) => (Category::FullHouse, group_kickers(&groups)),
        (_, true) => (Category::Flush, group_kickers(&groups)),
        (Some(high), false) => (Category::Straight, [high, 0, 0, 0, 0]),
        _ if counts.first() == Some(&3) => (Category::ThreeOfAKind, group_kickers(&groups)),
        _ if counts.starts_with(&[2, 2]) => (Category::TwoPair, group_kickers(&groups)),
        _ if counts.first() == Some(&2) => (Category::OnePair, group_kickers(&groups)),
        _ => (Category::HighCard, group_kickers(&groups)),
    };

    let mut best = cards.to_vec();
    best.sort_by(|a, b| b.rank.cmp(&a.rank).then(a.suit.cmp(&b.suit)));
    PokerHand {
        category,
        kickers,
        strength: pack_strength(category, &kickers),
        best,
    }
}

/// (count, rank) pairs ordered by count then rank, both descending.
fn grouped_ranks(rank_counts: &[u8; 15]) -> Vec<(u8, u8)> {
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|r| rank_counts[*r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    groups
}

fn group_kickers(groups: &[(u8, u8)]) -> [u8; 5] {
    let mut k = [0u8; 5];
    for (slot, (_, r)) in k.iter_mut().zip(groups) {
        *slot = *r;
    }
    k
}

fn pack_strength(category: Category, kickers: &[u8; 5]) -> u32 {
    kickers
        .iter()
        .fold(category as u32, |acc, k| (acc << 4) | u32::from(*k))
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

impl PokerHand {
    pub fn describe(&self) -> String {
        match self.category {
            Category::RoyalFlush => self.category.to_string(),
            _ => match Rank::from_high_value(self.kickers[0]) {
                Some(r) => format!("{} ({} high)", self.category, r),
                None => self.category.to_string(),
            },
        }
    }
}
