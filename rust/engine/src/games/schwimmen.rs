use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::eval::schwimmen::{score, SchwimmenRule, SchwimmenScore, HAND_SIZE};
use crate::game::{GameKind, GameState, Variant};
use crate::player::{PlayerId, Seat};
use crate::rules::RoundConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchwimmenState {
    /// Seat that knocked; the round ends when play comes back to it
    pub knocked_by: Option<usize>,
    /// Final scores in seat order, filled at reveal
    pub scores: Vec<SchwimmenScore>,
    /// Lowest score at reveal
    pub loser: Option<PlayerId>,
}

pub(crate) fn begin<R: Rng + ?Sized>(
    seats: &[Seat],
    config: RoundConfig,
    round: u32,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let deck = Deck::build(GameKind::Schwimmen, rng);
    let initial = SchwimmenState {
        knocked_by: None,
        scores: Vec::new(),
        loser: None,
    };
    let mut state = GameState::seated(
        GameKind::Schwimmen,
        seats,
        config,
        round,
        deck,
        Variant::Schwimmen(initial),
    )?;
    state.deal_each(HAND_SIZE)?;
    let table = state.deck.draw(HAND_SIZE)?;
    state.pile = table.into_iter().map(|c| c.revealed()).collect();
    settle_dealt_fire(&mut state)?;
    Ok(state)
}

/// With `schwimmen_fire_ends_round`, a Feuer dealt to any seat ends the
/// round before the first turn.
fn settle_dealt_fire(state: &mut GameState) -> Result<(), GameError> {
    let rules = state.config.rules;
    if !rules.schwimmen_fire_ends_round {
        return Ok(());
    }
    for p in &state.players {
        let dealt = score(&p.hand, &rules).map_err(|e| GameError::IllegalCard(e.to_string()))?;
        if dealt.rule == SchwimmenRule::Fire {
            let sw = schwimmen_state(state)?;
            return reveal(state, sw);
        }
    }
    Ok(())
}

fn schwimmen_state(state: &GameState) -> Result<SchwimmenState, GameError> {
    match &state.variant {
        Variant::Schwimmen(s) => Ok(s.clone()),
        _ => Err(GameError::illegal("not a Schwimmen round")),
    }
}

pub(crate) fn apply(state: &mut GameState, seat: usize, action: &Action) -> Result<(), GameError> {
    let mut sw = schwimmen_state(state)?;
    match action {
        Action::Swap {
            hand_index: Some(h),
            table_index: Some(t),
        } => {
            if *h >= HAND_SIZE || *t >= state.pile.len() {
                return Err(GameError::malformed(format!(
                    "swap indices out of range: hand {h}, table {t}"
                )));
            }
            let hand = &mut state.players[seat].hand;
            let taken = state.pile[*t].revealed();
            state.pile[*t] = hand[*h].revealed();
            hand[*h] = taken;
        }
        Action::Swap {
            hand_index: None,
            table_index: None,
        } => {
            let hand = std::mem::take(&mut state.players[seat].hand);
            state.players[seat].hand = std::mem::take(&mut state.pile);
            state.pile = hand.into_iter().map(|c| c.revealed()).collect();
        }
        Action::Swap { .. } => {
            return Err(GameError::malformed(
                "swap needs both indices for one card or neither for all three",
            ));
        }
        Action::Knock => {
            if sw.knocked_by.is_some() {
                return Err(GameError::illegal("someone has already knocked"));
            }
            sw.knocked_by = Some(seat);
        }
        other => {
            return Err(GameError::illegal(format!(
                "{} is not a Schwimmen action",
                other.name()
            )));
        }
    }

    let rules = state.config.rules;
    if rules.schwimmen_fire_ends_round {
        let current = score(&state.players[seat].hand, &rules)
            .map_err(|e| GameError::IllegalCard(e.to_string()))?;
        if current.rule == SchwimmenRule::Fire {
            return reveal(state, sw);
        }
    }
    let next = state.turn.advance(&state.players)?;
    if sw.knocked_by == Some(next) {
        return reveal(state, sw);
    }
    state.variant = Variant::Schwimmen(sw);
    Ok(())
}

/// Scores every hand; the lowest loses and the highest wins, earliest seat
/// first on ties.
fn reveal(state: &mut GameState, mut sw: SchwimmenState) -> Result<(), GameError> {
    let rules = state.config.rules;
    let mut scores = Vec::with_capacity(state.players.len());
    for p in &mut state.players {
        p.hand = p.hand.iter().map(|c| c.revealed()).collect();
        scores.push(score(&p.hand, &rules).map_err(|e| GameError::IllegalCard(e.to_string()))?);
    }
    let mut low = 0;
    let mut high = 0;
    for (i, s) in scores.iter().enumerate() {
        if s.score < scores[low].score {
            low = i;
        }
        if s.score > scores[high].score {
            high = i;
        }
    }
    sw.loser = Some(state.players[low].id.clone());
    sw.scores = scores;
    let winner = state.players[high].id.clone();
    state.variant = Variant::Schwimmen(sw);
    state.finish(Some(winner));
    Ok(())
}

pub(crate) fn legal_actions(state: &GameState, _seat: usize) -> Vec<Action> {
    let Ok(sw) = schwimmen_state(state) else {
        return Vec::new();
    };
    let mut actions = Vec::new();
    for h in 0..HAND_SIZE {
        for t in 0..state.pile.len() {
            actions.push(Action::swap_one(h, t));
        }
    }
    actions.push(Action::swap_all());
    if sw.knocked_by.is_none() {
        actions.push(Action::Knock);
    }
    actions
}
