use serde::{Deserialize, Serialize};

use super::ensure_standard;
use crate::cards::{Card, Rank};
use crate::errors::EvalError;
use crate::game::GameKind;
use crate::rules::RuleOptions;

pub const HAND_SIZE: usize = 3;
pub const FIRE_SCORE: f64 = 30.5;
pub const THREE_OF_A_KIND_SCORE: f64 = 30.5;
pub const THREE_ACES_SCORE: f64 = 33.0;

/// Which scoring rule produced a Schwimmen score, in priority order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchwimmenRule {
    /// Three sevens ("Feuer")
    Fire,
    ThreeAces,
    ThreeOfAKind,
    SameSuit,
    /// Best two cards sharing a suit
    TwoOfSuit,
    HighCard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchwimmenScore {
    pub score: f64,
    pub rule: SchwimmenRule,
    pub is_31: bool,
    pub is_fire: bool,
    pub description: String,
}

impl SchwimmenScore {
    fn new(score: f64, rule: SchwimmenRule, description: String) -> Self {
        Self {
            score,
            rule,
            is_31: match rule {
                SchwimmenRule::ThreeAces => true,
                SchwimmenRule::SameSuit => score == 31.0,
                _ => false,
            },
            is_fire: rule == SchwimmenRule::Fire,
            description,
        }
    }
}

/// Scores a three-card Schwimmen hand.
///
/// Rules are tried in a fixed order: three sevens, three aces (when the house
/// rule is on), any other three of a kind, three of one suit, the best pair
/// of suited cards, then the single highest card. Same-suit sums are not
/// capped at 31.
///
/// ```
/// use cardroom_engine::cards::parse_cards;
/// use cardroom_engine::eval::{score, SchwimmenRule};
/// use cardroom_engine::rules::RuleOptions;
///
/// let s = score(&parse_cards("Ah Kh 10h").unwrap(), &RuleOptions::default()).unwrap();
/// assert_eq!(s.score, 34.0);
/// assert_eq!(s.rule, SchwimmenRule::SameSuit);
/// assert!(!s.is_31);
/// ```
pub fn score(hand: &[Card], rules: &RuleOptions) -> Result<SchwimmenScore, EvalError> {
    if hand.len() != HAND_SIZE {
        return Err(EvalError::WrongHandSize {
            expected: HAND_SIZE,
            actual: hand.len(),
        });
    }
    ensure_standard(hand)?;

    let value = |c: &Card| f64::from(c.value_in(GameKind::Schwimmen));
    let same_rank = hand.iter().all(|c| c.rank == hand[0].rank);

    if same_rank && hand[0].rank == Rank::Seven {
        return Ok(SchwimmenScore::new(
            FIRE_SCORE,
            SchwimmenRule::Fire,
            "Feuer (three sevens)".into(),
        ));
    }
    if same_rank && hand[0].rank == Rank::Ace && rules.schwimmen_three_aces {
        return Ok(SchwimmenScore::new(
            THREE_ACES_SCORE,
            SchwimmenRule::ThreeAces,
            "three aces".into(),
        ));
    }
    if same_rank {
        return Ok(SchwimmenScore::new(
            THREE_OF_A_KIND_SCORE,
            SchwimmenRule::ThreeOfAKind,
            format!("three of a kind ({})", hand[0].rank),
        ));
    }
    if hand.iter().all(|c| c.suit == hand[0].suit) {
        let sum: f64 = hand.iter().map(value).sum();
        return Ok(SchwimmenScore::new(
            sum,
            SchwimmenRule::SameSuit,
            format!("same suit ({sum})"),
        ));
    }

    let mut best_pair: Option<f64> = None;
    for i in 0..HAND_SIZE {
        for j in i + 1..HAND_SIZE {
            if hand[i].suit == hand[j].suit {
                let sum = value(&hand[i]) + value(&hand[j]);
                best_pair = Some(best_pair.map_or(sum, |b| b.max(sum)));
            }
        }
    }
    if let Some(sum) = best_pair {
        return Ok(SchwimmenScore::new(
            sum,
            SchwimmenRule::TwoOfSuit,
            format!("two of a suit ({sum})"),
        ));
    }

    let high = hand.iter().map(value).fold(0.0, f64::max);
    Ok(SchwimmenScore::new(
        high,
        SchwimmenRule::HighCard,
        format!("high card ({high})"),
    ))
}
