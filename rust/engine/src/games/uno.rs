use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cards::{uno_colors, Card, Rank, Suit};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{GameKind, GameState, Variant};
use crate::player::Seat;
use crate::rules::{RoundConfig, RuleOptions};

pub const HAND_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnoState {
    /// Color to match; differs from the top card's suit after a wild
    pub color: Suit,
    /// Cards the next player must take unless they stack
    pub pending_draw: u32,
}

/// Whether `card` may be played onto `top` under the current color and
/// draw stack.
pub fn is_playable(card: &Card, top: &Card, state: &UnoState, rules: &RuleOptions) -> bool {
    if state.pending_draw > 0 {
        return rules.uno_stacking && matches!(card.rank, Rank::DrawTwo | Rank::DrawFour);
    }
    card.is_wild() || card.suit == state.color || card.rank == top.rank
}

pub(crate) fn begin<R: Rng + ?Sized>(
    seats: &[Seat],
    config: RoundConfig,
    round: u32,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let deck = Deck::build(GameKind::Uno, rng);
    let initial = UnoState {
        color: Suit::Red,
        pending_draw: 0,
    };
    let mut state =
        GameState::seated(GameKind::Uno, seats, config, round, deck, Variant::Uno(initial))?;
    state.deal_each(HAND_SIZE)?;

    // the starter must carry a color; wild cards go back under the deck
    let mut starter = None;
    for _ in 0..state.deck.len() {
        let card = state.deck.draw_one()?;
        if card.is_wild() {
            state.deck.put_bottom(card);
        } else {
            starter = Some(card);
            break;
        }
    }
    let starter = starter.ok_or(GameError::InsufficientCards {
        requested: 1,
        available: 0,
    })?;
    state.pile.push(starter.revealed());
    state.variant = Variant::Uno(UnoState {
        color: starter.suit,
        pending_draw: 0,
    });
    Ok(state)
}

fn uno_state(state: &GameState) -> Result<UnoState, GameError> {
    match &state.variant {
        Variant::Uno(uno) => Ok(*uno),
        _ => Err(GameError::illegal("not an UNO round")),
    }
}

pub(crate) fn apply<R: Rng + ?Sized>(
    state: &mut GameState,
    seat: usize,
    action: &Action,
    rng: &mut R,
) -> Result<(), GameError> {
    let mut uno = uno_state(state)?;
    match action {
        Action::Play {
            cards,
            chosen_color,
            claimed_rank,
        } => {
            if claimed_rank.is_some() {
                return Err(GameError::malformed("UNO plays do not claim a rank"));
            }
            let [id] = cards.as_slice() else {
                return Err(GameError::malformed("UNO plays exactly one card"));
            };
            let card = *state.players[seat]
                .hand
                .iter()
                .find(|c| c.id == *id)
                .ok_or_else(|| GameError::IllegalCard(format!("card {id} is not in hand")))?;
            let top = *state
                .top_of_pile()
                .ok_or_else(|| GameError::illegal("discard pile is empty"))?;
            if !is_playable(&card, &top, &uno, &state.config.rules) {
                return Err(GameError::IllegalCard(format!("{card} cannot be played on {top}")));
            }
            let color = match (card.is_wild(), chosen_color) {
                (true, Some(c)) if c.is_uno_color() => *c,
                (true, _) => {
                    return Err(GameError::malformed("wild cards need a color to be chosen"));
                }
                (false, Some(_)) => {
                    return Err(GameError::malformed("only wild cards take a chosen color"));
                }
                (false, None) => card.suit,
            };

            state.players[seat].take_cards(&[card.id])?;
            state.pile.push(card.revealed());
            uno.color = color;
            if state.players[seat].hand.is_empty() {
                state.variant = Variant::Uno(uno);
                let winner = state.players[seat].id.clone();
                state.finish(Some(winner));
                return Ok(());
            }
            match card.rank {
                Rank::Reverse => {
                    state.turn.reverse();
                    state.turn.advance(&state.players)?;
                }
                Rank::Skip => {
                    state.turn.skip(&state.players)?;
                }
                Rank::DrawTwo => {
                    uno.pending_draw += 2;
                    state.turn.advance(&state.players)?;
                }
                Rank::DrawFour => {
                    uno.pending_draw += 4;
                    state.turn.advance(&state.players)?;
                }
                _ => {
                    state.turn.advance(&state.players)?;
                }
            }
        }
        Action::Draw => {
            let count = uno.pending_draw.max(1) as usize;
            let drawn = state.draw_cards(count, rng)?;
            state.players[seat].hand.extend(drawn);
            uno.pending_draw = 0;
            state.turn.advance(&state.players)?;
        }
        other => {
            return Err(GameError::illegal(format!(
                "{} is not an UNO action",
                other.name()
            )));
        }
    }
    state.variant = Variant::Uno(uno);
    Ok(())
}

pub(crate) fn legal_actions(state: &GameState, seat: usize) -> Vec<Action> {
    let (Ok(uno), Some(top)) = (uno_state(state), state.top_of_pile()) else {
        return Vec::new();
    };
    let mut actions = Vec::new();
    for card in &state.players[seat].hand {
        if !is_playable(card, top, &uno, &state.config.rules) {
            continue;
        }
        if card.is_wild() {
            actions.extend(uno_colors().map(|c| Action::play_wild(card.id, c)));
        } else {
            actions.push(Action::play(card.id));
        }
    }
    actions.push(Action::Draw);
    actions
}
