use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::eval::poker::{evaluate, PokerHand};
use crate::game::{GameKind, GameState, Variant};
use crate::player::{Player, PlayerId, Seat};
use crate::rules::{validate_bet, RoundConfig};
use crate::turn::TurnTracker;

pub const HOLE_CARDS: usize = 2;

/// Represents a betting street in Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    /// Hole cards only
    Preflop,
    /// Three board cards
    Flop,
    /// Fourth board card
    Turn,
    /// Fifth board card
    River,
    Showdown,
}

impl Street {
    /// Next street and how many board cards it adds.
    fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River => Some((Street::Showdown, 0)),
            Street::Showdown => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub player_id: PlayerId,
    pub hand: PokerHand,
    pub won: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokerState {
    pub street: Street,
    /// Chips collected from finished streets
    pub pot: u32,
    /// Highest commitment on the current street
    pub current_bet: u32,
    /// Seats that have acted since the last raise
    pub acted: Vec<bool>,
    pub burned: Vec<Card>,
    #[serde(default)]
    pub showdown: Vec<ShowdownEntry>,
}

impl PokerState {
    /// Pot plus every chip still in front of the players.
    pub fn total_pot(&self, players: &[Player]) -> u32 {
        self.pot + players.iter().map(|p| p.bet).sum::<u32>()
    }
}

fn can_act(p: &Player) -> bool {
    p.is_active() && p.chips > 0
}

pub(crate) fn begin<R: Rng + ?Sized>(
    seats: &[Seat],
    config: RoundConfig,
    round: u32,
    rng: &mut R,
) -> Result<GameState, GameError> {
    let deck = Deck::build(GameKind::Poker, rng);
    let initial = PokerState {
        street: Street::Preflop,
        pot: 0,
        current_bet: 0,
        acted: vec![false; seats.len()],
        burned: Vec::new(),
        showdown: Vec::new(),
    };
    let mut state =
        GameState::seated(GameKind::Poker, seats, config, round, deck, Variant::Poker(initial))?;
    state.deal_each(HOLE_CARDS)?;
    Ok(state)
}

fn poker_state(state: &GameState) -> Result<PokerState, GameError> {
    match &state.variant {
        Variant::Poker(p) => Ok(p.clone()),
        _ => Err(GameError::illegal("not a poker round")),
    }
}

pub(crate) fn apply(state: &mut GameState, seat: usize, action: &Action) -> Result<(), GameError> {
    let mut pk = poker_state(state)?;
    match action {
        Action::Fold => {
            state.players[seat].folded = true;
            pk.acted[seat] = true;
            let live: Vec<usize> = (0..state.players.len())
                .filter(|i| state.players[*i].is_active())
                .collect();
            if let [last] = live.as_slice() {
                let pot = pk.total_pot(&state.players);
                for p in &mut state.players {
                    p.bet = 0;
                }
                pk.pot = 0;
                state.players[*last].add_chips(pot);
                let winner = state.players[*last].id.clone();
                state.variant = Variant::Poker(pk);
                state.finish(Some(winner));
                return Ok(());
            }
        }
        Action::Check => {
            if state.players[seat].bet != pk.current_bet {
                return Err(GameError::illegal(format!(
                    "cannot check facing a bet of {}",
                    pk.current_bet
                )));
            }
            pk.acted[seat] = true;
        }
        Action::Bet { amount } => {
            let p = &state.players[seat];
            let bet = validate_bet(p.chips, p.bet, pk.current_bet, *amount)?;
            state.players[seat].commit(bet.amount())?;
            let committed = state.players[seat].bet;
            if committed > pk.current_bet {
                pk.current_bet = committed;
                for (i, acted) in pk.acted.iter_mut().enumerate() {
                    *acted = i == seat;
                }
            } else {
                pk.acted[seat] = true;
            }
        }
        other => {
            return Err(GameError::illegal(format!(
                "{} is not a poker action",
                other.name()
            )));
        }
    }

    if betting_complete(&state.players, &pk) {
        return next_street(state, pk);
    }
    let players = &state.players;
    state.turn.advance_where(players.len(), |i| can_act(&players[i]))?;
    state.variant = Variant::Poker(pk);
    Ok(())
}

/// Every seat that can still act has acted and matched the current bet.
fn betting_complete(players: &[Player], pk: &PokerState) -> bool {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| can_act(p))
        .all(|(i, p)| pk.acted[i] && p.bet == pk.current_bet)
}

/// Collects bets and deals the following streets. Streets are run out
/// without betting while fewer than two players can still act.
fn next_street(state: &mut GameState, mut pk: PokerState) -> Result<(), GameError> {
    loop {
        for p in &mut state.players {
            pk.pot += p.bet;
            p.bet = 0;
        }
        pk.current_bet = 0;
        pk.acted.iter_mut().for_each(|a| *a = false);

        let Some((street, cards)) = pk.street.next() else {
            break;
        };
        pk.street = street;
        if street == Street::Showdown {
            break;
        }
        pk.burned.push(state.deck.burn()?);
        let board = state.deck.draw(cards)?;
        state.pile.extend(board.into_iter().map(|c| c.revealed()));

        if state.players.iter().filter(|p| can_act(p)).count() >= 2 {
            let players = &state.players;
            state.turn = TurnTracker::new(players.len() - 1);
            state.turn.advance_where(players.len(), |i| can_act(&players[i]))?;
            state.variant = Variant::Poker(pk);
            return Ok(());
        }
    }
    showdown(state, pk)
}

/// Best hand takes the pot; exact ties split it with odd chips going to the
/// earliest seat.
fn showdown(state: &mut GameState, mut pk: PokerState) -> Result<(), GameError> {
    let mut entries = Vec::new();
    for p in state.players.iter_mut().filter(|p| p.is_active()) {
        p.hand = p.hand.iter().map(|c| c.revealed()).collect();
        let hand = evaluate(&p.hand, &state.pile)
            .map_err(|e| GameError::IllegalCard(e.to_string()))?;
        entries.push(ShowdownEntry {
            player_id: p.id.clone(),
            hand,
            won: 0,
        });
    }
    let best = entries
        .iter()
        .map(|e| e.hand.strength)
        .max()
        .ok_or(GameError::NoActivePlayers)?;
    let winners: Vec<usize> = (0..entries.len())
        .filter(|i| entries[*i].hand.strength == best)
        .collect();
    let share = pk.pot / winners.len() as u32;
    let mut odd = pk.pot % winners.len() as u32;
    for &w in &winners {
        let extra = u32::from(odd > 0);
        odd -= extra;
        entries[w].won = share + extra;
    }
    for e in &entries {
        if let Some(p) = state.players.iter_mut().find(|p| p.id == e.player_id) {
            p.add_chips(e.won);
        }
    }
    pk.pot = 0;
    let winner = entries[winners[0]].player_id.clone();
    pk.showdown = entries;
    state.variant = Variant::Poker(pk);
    state.finish(Some(winner));
    Ok(())
}

pub(crate) fn legal_actions(state: &GameState, seat: usize) -> Vec<Action> {
    let Ok(pk) = poker_state(state) else {
        return Vec::new();
    };
    let p = &state.players[seat];
    let to_call = pk.current_bet.saturating_sub(p.bet);
    let mut actions = vec![Action::Fold];
    if to_call == 0 {
        actions.push(Action::Check);
    } else {
        actions.push(Action::Bet {
            amount: to_call.min(p.chips),
        });
    }
    let raise = to_call + 10;
    if raise < p.chips {
        actions.push(Action::Bet { amount: raise });
    }
    if p.chips > to_call {
        actions.push(Action::Bet { amount: p.chips });
    }
    actions
}
