use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::action::{Action, ActionRequest};
use crate::errors::GameError;
use crate::game::{GameKind, GameState};
use crate::games::{blackjack, bullshit, poker, schwimmen, uno};
use crate::logger::{ActionRecord, RoundRecord, RoundResult};
use crate::player::{PlayerId, Seat};
use crate::rules::RoundConfig;

/// Builds the deck for `game`, seats the players and deals their hands.
pub fn begin_round<R: Rng + ?Sized>(
    game: GameKind,
    seats: &[Seat],
    config: RoundConfig,
    round: u32,
    rng: &mut R,
) -> Result<GameState, GameError> {
    match game {
        GameKind::Uno => uno::begin(seats, config, round, rng),
        GameKind::Blackjack => blackjack::begin(seats, config, round, rng),
        GameKind::Schwimmen => schwimmen::begin(seats, config, round, rng),
        GameKind::Poker => poker::begin(seats, config, round, rng),
        GameKind::Bullshit => bullshit::begin(seats, config, round, rng),
    }
}

/// Checks the turn and hands the action to the round's state machine.
///
/// On error `state` may be partly updated; [`Table::apply`] is the atomic
/// entry point.
pub fn apply_action<R: Rng + ?Sized>(
    state: &mut GameState,
    player_id: &PlayerId,
    action: &Action,
    rng: &mut R,
) -> Result<(), GameError> {
    let seat = state.require_turn(player_id)?;
    match state.game {
        GameKind::Uno => uno::apply(state, seat, action, rng),
        GameKind::Blackjack => blackjack::apply(state, seat, action, rng),
        GameKind::Schwimmen => schwimmen::apply(state, seat, action),
        GameKind::Poker => poker::apply(state, seat, action),
        GameKind::Bullshit => bullshit::apply(state, seat, action),
    }
}

/// Actions `player_id` may take right now; empty when it is not their turn.
pub fn legal_actions(state: &GameState, player_id: &PlayerId) -> Vec<Action> {
    let Ok(seat) = state.require_turn(player_id) else {
        return Vec::new();
    };
    match state.game {
        GameKind::Uno => uno::legal_actions(state, seat),
        GameKind::Blackjack => blackjack::legal_actions(state, seat),
        GameKind::Schwimmen => schwimmen::legal_actions(state, seat),
        GameKind::Poker => poker::legal_actions(state, seat),
        GameKind::Bullshit => bullshit::legal_actions(state, seat),
    }
}

/// One round in progress: the authoritative state, the RNG that shuffles
/// for it, and the record of every accepted action.
///
/// # Examples
///
/// ```
/// use cardroom_engine::engine::Table;
/// use cardroom_engine::game::{GameKind, GameStatus};
/// use cardroom_engine::player::Seat;
/// use cardroom_engine::rules::RoundConfig;
///
/// let seats = vec![Seat::new("a", "Ann"), Seat::new("b", "Bob")];
/// let mut table = Table::begin(GameKind::Poker, &seats, RoundConfig::default(), 1, 42).unwrap();
/// assert_eq!(table.state().status, GameStatus::Playing);
///
/// let first = table.state().players[0].id.clone();
/// let err = table.apply(&"b".into(), cardroom_engine::action::Action::Check);
/// assert!(err.is_err());
/// table.apply(&first, cardroom_engine::action::Action::Fold).unwrap();
/// assert_eq!(table.state().status, GameStatus::Finished);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    state: GameState,
    rng: ChaCha20Rng,
    record: RoundRecord,
}

impl Table {
    pub fn begin(
        game: GameKind,
        seats: &[Seat],
        config: RoundConfig,
        round: u32,
        seed: u64,
    ) -> Result<Self, GameError> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let state = begin_round(game, seats, config, round, &mut rng)?;
        let mut record = RoundRecord::new(game, round, seed, seats, config);
        if state.is_finished() {
            record.result = Some(RoundResult::from_state(&state));
        }
        Ok(Self { state, rng, record })
    }

    /// Applies one action all-or-nothing: on rejection neither the state
    /// nor the RNG moves.
    pub fn apply(&mut self, player_id: &PlayerId, action: Action) -> Result<&GameState, GameError> {
        let mut next = self.state.clone();
        let mut rng = self.rng.clone();
        apply_action(&mut next, player_id, &action, &mut rng)?;
        self.state = next;
        self.rng = rng;
        let seq = self.record.actions.len() as u32 + 1;
        self.record.actions.push(ActionRecord {
            seq,
            request: ActionRequest {
                player_id: player_id.clone(),
                action,
            },
        });
        if self.state.is_finished() {
            self.record.result = Some(RoundResult::from_state(&self.state));
        }
        Ok(&self.state)
    }

    /// Rebuilds a round from its record and re-applies every action.
    pub fn replay(record: &RoundRecord) -> Result<Self, GameError> {
        let mut table = Self::begin(
            record.game,
            &record.seats,
            record.config,
            record.round,
            record.seed,
        )?;
        table.record.round_id = record.round_id.clone();
        for a in &record.actions {
            table.apply(&a.request.player_id, a.request.action.clone())?;
        }
        Ok(table)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn record(&self) -> &RoundRecord {
        &self.record
    }

    pub fn seed(&self) -> u64 {
        self.record.seed
    }

    pub fn legal_actions(&self, player_id: &PlayerId) -> Vec<Action> {
        legal_actions(&self.state, player_id)
    }

    /// The player whose turn it is, if the round is still in play.
    pub fn current_player_id(&self) -> Option<&PlayerId> {
        self.state.current_player().map(|p| &p.id)
    }
}
