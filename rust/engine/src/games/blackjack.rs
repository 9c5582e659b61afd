use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::eval::blackjack::{value_of, HandValue};
use crate::game::{GameKind, GameState, Variant};
use crate::player::{PlayerId, Seat};
use crate::rules::RoundConfig;

pub const HAND_SIZE: usize = 2;
/// The dealer stands on this total or more.
pub const DEALER_STANDS_AT: u32 = 17;

/// The house hand. It is not a seat and never takes a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    pub hand: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Natural 21, paid 3:2
    Blackjack,
    Win,
    Push,
    Lose,
    Bust,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub player_id: PlayerId,
    pub outcome: Outcome,
    pub value: u32,
    /// Chips returned to the player, wager included
    pub payout: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackjackState {
    pub dealer: Dealer,
    /// Seats that have finished acting
    pub done: Vec<bool>,
    pub settlements: Vec<Settlement>,
}

pub(crate) fn begin<R: Rng + ?Sized>(
    seats: &[Seat],
    config: RoundConfig,
    round: u32,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let deck = Deck::build(GameKind::Blackjack, rng);
    let initial = BlackjackState {
        dealer: Dealer::default(),
        done: vec![false; seats.len()],
        settlements: Vec::new(),
    };
    let mut state = GameState::seated(
        GameKind::Blackjack,
        seats,
        config,
        round,
        deck,
        Variant::Blackjack(initial),
    )?;
    for p in &mut state.players {
        p.commit(config.blackjack_bet)?;
    }
    state.deal_each(HAND_SIZE)?;

    let mut bj = blackjack_state(&state)?;
    let mut dealer_cards = state.deck.draw(HAND_SIZE)?;
    if let Some(up) = dealer_cards.first_mut() {
        *up = up.revealed();
    }
    bj.dealer.hand = dealer_cards;
    for (i, p) in state.players.iter().enumerate() {
        bj.done[i] = value_of(&p.hand).map(|v| v.is_blackjack).unwrap_or(false);
    }
    let done = bj.done.clone();
    match state.turn.settle_where(done.len(), |i| !done[i]) {
        Ok(_) => state.variant = Variant::Blackjack(bj),
        Err(GameError::NoActivePlayers) => finish_round(&mut state, bj, rng)?,
        Err(e) => return Err(e),
    }
    Ok(state)
}

fn blackjack_state(state: &GameState) -> Result<BlackjackState, GameError> {
    match &state.variant {
        Variant::Blackjack(bj) => Ok(bj.clone()),
        _ => Err(GameError::illegal("not a blackjack round")),
    }
}

fn hand_value(cards: &[Card]) -> Result<HandValue, GameError> {
    value_of(cards).map_err(|e| GameError::IllegalCard(e.to_string()))
}

pub(crate) fn apply<R: Rng + ?Sized>(
    state: &mut GameState,
    seat: usize,
    action: &Action,
    rng: &mut R,
) -> Result<(), GameError> {
    let mut bj = blackjack_state(state)?;
    if bj.done[seat] {
        return Err(GameError::illegal("seat has already finished acting"));
    }
    match action {
        Action::Hit => {
            let card = state.draw_cards(1, rng)?;
            state.players[seat].hand.extend(card);
            if hand_value(&state.players[seat].hand)?.is_bust {
                bj.done[seat] = true;
            }
        }
        Action::Stand => bj.done[seat] = true,
        Action::Double => {
            let player = &state.players[seat];
            if player.hand.len() != HAND_SIZE {
                return Err(GameError::illegal("double is only allowed on the first two cards"));
            }
            let wager = player.bet;
            state.players[seat].commit(wager)?;
            let card = state.draw_cards(1, rng)?;
            state.players[seat].hand.extend(card);
            bj.done[seat] = true;
        }
        other => {
            return Err(GameError::illegal(format!(
                "{} is not a blackjack action",
                other.name()
            )));
        }
    }

    let done = bj.done.clone();
    match state.turn.advance_where(done.len(), |i| !done[i]) {
        Ok(_) => {
            state.variant = Variant::Blackjack(bj);
            Ok(())
        }
        Err(GameError::NoActivePlayers) => finish_round(state, bj, rng),
        Err(e) => Err(e),
    }
}

/// Dealer draws to 17, then every seat is paid out.
fn finish_round<R: Rng + ?Sized>(
    state: &mut GameState,
    mut bj: BlackjackState,
    rng: &mut R,
) -> Result<(), GameError> {
    while hand_value(&bj.dealer.hand)?.value < DEALER_STANDS_AT {
        let card = state.draw_cards(1, rng)?;
        bj.dealer.hand.extend(card);
    }
    bj.dealer.hand = bj.dealer.hand.iter().map(|c| c.revealed()).collect();
    let dealer = hand_value(&bj.dealer.hand)?;

    let mut settlements = Vec::with_capacity(state.players.len());
    for p in &mut state.players {
        let hand = hand_value(&p.hand)?;
        let outcome = settle(&hand, &dealer);
        let payout = match outcome {
            Outcome::Blackjack => p.bet + p.bet * 3 / 2,
            Outcome::Win => p.bet * 2,
            Outcome::Push => p.bet,
            Outcome::Lose | Outcome::Bust => 0,
        };
        p.add_chips(payout);
        settlements.push(Settlement {
            player_id: p.id.clone(),
            outcome,
            value: hand.value,
            payout,
        });
    }

    let winner = settlements
        .iter()
        .filter(|s| matches!(s.outcome, Outcome::Blackjack | Outcome::Win))
        .fold(None::<&Settlement>, |best, s| match best {
            Some(b) if b.value >= s.value => Some(b),
            _ => Some(s),
        })
        .map(|s| s.player_id.clone());
    bj.settlements = settlements;
    state.variant = Variant::Blackjack(bj);
    state.finish(winner);
    Ok(())
}

/// Outcome of one player's hand against the dealer's.
pub fn settle(player: &HandValue, dealer: &HandValue) -> Outcome {
    if player.is_bust {
        return Outcome::Bust;
    }
    match (player.is_blackjack, dealer.is_blackjack) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::Blackjack,
        (false, true) => return Outcome::Lose,
        (false, false) => {}
    }
    if dealer.is_bust {
        return Outcome::Win;
    }
    match player.value.cmp(&dealer.value) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Equal => Outcome::Push,
        std::cmp::Ordering::Less => Outcome::Lose,
    }
}

pub(crate) fn legal_actions(state: &GameState, seat: usize) -> Vec<Action> {
    let Ok(bj) = blackjack_state(state) else {
        return Vec::new();
    };
    if bj.done[seat] {
        return Vec::new();
    }
    let p = &state.players[seat];
    let mut actions = vec![Action::Hit, Action::Stand];
    if p.hand.len() == HAND_SIZE && p.chips >= p.bet {
        actions.push(Action::Double);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hv(value: u32, is_blackjack: bool) -> HandValue {
        HandValue {
            value,
            is_soft: false,
            is_bust: value > 21,
            is_blackjack,
        }
    }

    #[test]
    fn blackjack_beats_three_card_21() {
        assert_eq!(settle(&hv(21, true), &hv(21, false)), Outcome::Blackjack);
        assert_eq!(settle(&hv(21, false), &hv(21, true)), Outcome::Lose);
        assert_eq!(settle(&hv(21, true), &hv(21, true)), Outcome::Push);
    }

    #[test]
    fn bust_player_loses_even_if_dealer_busts() {
        assert_eq!(settle(&hv(23, false), &hv(24, false)), Outcome::Bust);
        assert_eq!(settle(&hv(12, false), &hv(24, false)), Outcome::Win);
        assert_eq!(settle(&hv(18, false), &hv(18, false)), Outcome::Push);
        assert_eq!(settle(&hv(17, false), &hv(19, false)), Outcome::Lose);
    }
}
