use cardroom_engine::action::Action;
use cardroom_engine::engine::Table;
use cardroom_engine::game::{GameKind, GameState};
use cardroom_engine::logger::{RoundRecord, RoundResult};
use cardroom_engine::player::{PlayerId, Seat};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

use crate::errors::RoomError;
use crate::events::{EventBus, RoomEvent};
use crate::settings::{RoomSettings, SettingsError, SettingsStore};

pub type RoomId = String;

/// One room's table. The mutex is the serialization point: every action for
/// the room runs while holding it, so two clients racing for the same turn
/// cannot both apply.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    slot: Mutex<TableSlot>,
    created_at: Instant,
    last_active: Mutex<Instant>,
}

#[derive(Debug, Default)]
struct TableSlot {
    table: Option<Table>,
    rounds: u32,
}

impl Room {
    fn new(id: RoomId) -> Self {
        let now = Instant::now();
        Self {
            id,
            slot: Mutex::new(TableSlot::default()),
            created_at: now,
            last_active: Mutex::new(now),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    fn touch(&self) {
        if let Ok(mut last) = self.last_active.lock() {
            *last = Instant::now();
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_active
            .lock()
            .map(|last| last.elapsed() > ttl)
            .unwrap_or(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, TableSlot>, RoomError> {
        self.slot.lock().map_err(|_| {
            tracing::error!(room_id = %self.id, "room table lock poisoned");
            RoomError::StoragePoisoned
        })
    }
}

/// The authority over every room's game state.
///
/// Clients never touch a [`GameState`] directly: they propose actions
/// through [`RoomRegistry::apply_action`] and get back either a fresh
/// snapshot or the reason for the rejection.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Arc<Room>>>,
    event_bus: Arc<EventBus>,
    settings: SettingsStore,
    ttl_override: Option<Duration>,
}

impl RoomRegistry {
    pub fn new(event_bus: Arc<EventBus>) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            event_bus,
            settings: SettingsStore::new(),
            ttl_override: None,
        }
    }

    pub fn with_settings(
        event_bus: Arc<EventBus>,
        settings: RoomSettings,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            settings: SettingsStore::with_settings(settings)?,
            ..Self::new(event_bus)
        })
    }

    /// Fixes the idle timeout regardless of the stored settings.
    pub fn with_ttl(event_bus: Arc<EventBus>, ttl: Duration) -> Self {
        Self {
            ttl_override: Some(ttl),
            ..Self::new(event_bus)
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    fn room_ttl(&self) -> Result<Duration, RoomError> {
        match self.ttl_override {
            Some(ttl) => Ok(ttl),
            None => self
                .settings
                .get()
                .map(|s| s.room_ttl())
                .map_err(|_| RoomError::StoragePoisoned),
        }
    }

    /// Opens a room under a fresh id.
    pub fn create_room(&self) -> Result<RoomId, RoomError> {
        self.open_room(uuid::Uuid::new_v4().to_string())
    }

    /// Opens a room under a caller-chosen id; an existing room is kept.
    pub fn open_room(&self, room_id: impl Into<RoomId>) -> Result<RoomId, RoomError> {
        let room_id = room_id.into();
        let mut rooms = self.rooms.write().map_err(|_| RoomError::StoragePoisoned)?;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!(room_id = %room_id, "room opened");
                Arc::new(Room::new(room_id.clone()))
            });
        Ok(room_id)
    }

    /// Deals a new round with a random seed, replacing any round in the room.
    pub fn begin_round(
        &self,
        room_id: &RoomId,
        game: GameKind,
        seats: &[Seat],
    ) -> Result<GameState, RoomError> {
        self.begin_round_seeded(room_id, game, seats, rand::random())
    }

    /// Deals a new round whose shuffles all derive from `seed`.
    pub fn begin_round_seeded(
        &self,
        room_id: &RoomId,
        game: GameKind,
        seats: &[Seat],
        seed: u64,
    ) -> Result<GameState, RoomError> {
        let (min, max) = game.seat_range();
        if seats.len() < min || seats.len() > max {
            return Err(RoomError::InvalidSeats(format!(
                "{game} needs {min} to {max} players, got {}",
                seats.len()
            )));
        }
        let config = self
            .settings
            .get()
            .map_err(|_| RoomError::StoragePoisoned)?
            .round;

        let room = self.live_room(room_id)?;
        let mut slot = room.lock()?;
        let round = slot.rounds + 1;
        let table = Table::begin(game, seats, config, round, seed)?;
        let state = table.snapshot();

        tracing::info!(
            room_id = %room_id,
            game = %game,
            round,
            seed,
            players = seats.len(),
            "round started"
        );
        self.event_bus.broadcast(
            room_id,
            RoomEvent::RoundStarted {
                room_id: room_id.clone(),
                game,
                round,
                seed,
                state: state.clone(),
            },
        );
        if state.is_finished() {
            self.round_finished(room_id, &table);
        }

        slot.rounds = round;
        slot.table = Some(table);
        Ok(state)
    }

    /// The only way a room's state changes. On rejection the state is
    /// unchanged and the reason is both returned and broadcast.
    pub fn apply_action(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
        action: Action,
    ) -> Result<GameState, RoomError> {
        let room = self.live_room(room_id)?;
        let mut slot = room.lock()?;
        let table = slot
            .table
            .as_mut()
            .ok_or_else(|| RoomError::NoRound(room_id.clone()))?;

        let name = action.name();
        match table.apply(player_id, action.clone()) {
            Ok(state) => {
                let state = state.clone();
                tracing::debug!(
                    room_id = %room_id,
                    player_id = %player_id,
                    action = name,
                    "action applied"
                );
                self.event_bus.broadcast(
                    room_id,
                    RoomEvent::ActionApplied {
                        room_id: room_id.clone(),
                        player_id: player_id.clone(),
                        action,
                        state: state.clone(),
                    },
                );
                if state.is_finished() {
                    self.round_finished(room_id, table);
                }
                Ok(state)
            }
            Err(err) => {
                let err = RoomError::from(err);
                tracing::warn!(
                    room_id = %room_id,
                    player_id = %player_id,
                    action = name,
                    code = err.code(),
                    error = %err,
                    "action rejected"
                );
                self.event_bus.broadcast(
                    room_id,
                    RoomEvent::ActionRejected {
                        room_id: room_id.clone(),
                        player_id: player_id.clone(),
                        rejection: err.to_rejection(),
                    },
                );
                Err(err)
            }
        }
    }

    pub fn snapshot(&self, room_id: &RoomId) -> Result<GameState, RoomError> {
        self.with_table(room_id, Table::snapshot)
    }

    pub fn legal_actions(
        &self,
        room_id: &RoomId,
        player_id: &PlayerId,
    ) -> Result<Vec<Action>, RoomError> {
        self.with_table(room_id, |t| t.legal_actions(player_id))
    }

    /// Replayable record of the room's current round.
    pub fn round_record(&self, room_id: &RoomId) -> Result<RoundRecord, RoomError> {
        self.with_table(room_id, |t| t.record().clone())
    }

    pub fn close_room(&self, room_id: &RoomId) -> Result<(), RoomError> {
        let removed = self
            .rooms
            .write()
            .map_err(|_| RoomError::StoragePoisoned)?
            .remove(room_id);
        if removed.is_none() {
            return Err(RoomError::NotFound(room_id.clone()));
        }
        tracing::info!(room_id = %room_id, "room closed");
        self.closed(room_id, "closed_by_request");
        Ok(())
    }

    /// Drops every room idle past the TTL; returns how many were removed.
    pub fn cleanup_expired_rooms(&self) -> usize {
        let Ok(ttl) = self.room_ttl() else {
            return 0;
        };
        let mut expired = Vec::new();
        {
            let mut rooms = match self.rooms.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            rooms.retain(|id, room| {
                let keep = !room.is_expired(ttl);
                if !keep {
                    expired.push(id.clone());
                }
                keep
            });
        }
        for room_id in &expired {
            tracing::info!(room_id = %room_id, "room expired");
            self.closed(room_id, "expired");
        }
        expired.len()
    }

    pub fn active_rooms(&self) -> Vec<RoomId> {
        self.rooms
            .read()
            .map(|rooms| rooms.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Looks up a room, expiring it if it sat idle too long, and marks it
    /// active.
    fn live_room(&self, room_id: &RoomId) -> Result<Arc<Room>, RoomError> {
        let room = self.room(room_id)?;
        if room.is_expired(self.room_ttl()?) {
            self.expire_room(room_id);
            return Err(RoomError::Expired(room_id.clone()));
        }
        room.touch();
        Ok(room)
    }

    fn room(&self, room_id: &RoomId) -> Result<Arc<Room>, RoomError> {
        self.rooms
            .read()
            .map_err(|_| RoomError::StoragePoisoned)?
            .get(room_id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    fn with_table<T>(
        &self,
        room_id: &RoomId,
        read: impl FnOnce(&Table) -> T,
    ) -> Result<T, RoomError> {
        let room = self.room(room_id)?;
        let slot = room.lock()?;
        slot.table
            .as_ref()
            .map(read)
            .ok_or_else(|| RoomError::NoRound(room_id.clone()))
    }

    fn expire_room(&self, room_id: &RoomId) {
        let removed = match self.rooms.write() {
            Ok(mut rooms) => rooms.remove(room_id),
            Err(poisoned) => poisoned.into_inner().remove(room_id),
        };
        if removed.is_some() {
            tracing::info!(room_id = %room_id, "room expired");
            self.closed(room_id, "expired");
        }
    }

    fn closed(&self, room_id: &RoomId, reason: &str) {
        self.event_bus.broadcast(
            room_id,
            RoomEvent::RoomClosed {
                room_id: room_id.clone(),
                reason: reason.to_string(),
            },
        );
        self.event_bus.drop_room(room_id);
    }

    fn round_finished(&self, room_id: &RoomId, table: &Table) {
        let record = table.record();
        let result = record
            .result
            .clone()
            .unwrap_or_else(|| RoundResult::from_state(table.state()));
        tracing::info!(
            room_id = %room_id,
            round_id = %record.round_id,
            winner = ?result.winner,
            actions = record.actions.len(),
            "round finished"
        );
        self.event_bus.broadcast(
            room_id,
            RoomEvent::RoundFinished {
                room_id: room_id.clone(),
                round_id: record.round_id.clone(),
                result,
            },
        );
    }
}
