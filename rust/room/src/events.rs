use cardroom_engine::action::Action;
use cardroom_engine::game::{GameKind, GameState};
use cardroom_engine::logger::RoundResult;
use cardroom_engine::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use crate::errors::Rejection;
use crate::rooms::RoomId;

// Bounded so a stalled subscriber cannot grow memory; it is dropped instead.
const EVENT_CHANNEL_BUFFER: usize = 1000;

pub type EventSender = mpsc::Sender<RoomEvent>;
pub type EventReceiver = mpsc::Receiver<RoomEvent>;

/// What the room tells the transport after each change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    RoundStarted {
        room_id: RoomId,
        game: GameKind,
        round: u32,
        seed: u64,
        state: GameState,
    },
    ActionApplied {
        room_id: RoomId,
        player_id: PlayerId,
        action: Action,
        state: GameState,
    },
    /// Sent to the room so the originating client learns why
    ActionRejected {
        room_id: RoomId,
        player_id: PlayerId,
        rejection: Rejection,
    },
    RoundFinished {
        room_id: RoomId,
        round_id: String,
        result: RoundResult,
    },
    RoomClosed {
        room_id: RoomId,
        reason: String,
    },
}

impl RoomEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            RoomEvent::RoundStarted { .. } => "round_started",
            RoomEvent::ActionApplied { .. } => "action_applied",
            RoomEvent::ActionRejected { .. } => "action_rejected",
            RoomEvent::RoundFinished { .. } => "round_finished",
            RoomEvent::RoomClosed { .. } => "room_closed",
        }
    }
}

pub struct EventSubscription {
    bus: EventBus,
    room_id: RoomId,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(&self.room_id, self.subscriber_id);
    }
}

/// Per-room fan-out of [`RoomEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<HashMap<RoomId, Vec<(usize, EventSender)>>>,
    next_id: AtomicUsize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, room_id: RoomId) -> EventSubscription {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        self.inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned")
            .entry(room_id.clone())
            .or_default()
            .push((id, tx));

        tracing::info!(room_id = %room_id, subscriber_id = id, "subscribed to room events");

        EventSubscription {
            bus: self.clone(),
            room_id,
            subscriber_id: id,
            receiver: rx,
        }
    }

    /// Never blocks: a subscriber whose buffer is full or whose receiver is
    /// gone is removed.
    pub fn broadcast(&self, room_id: &RoomId, event: RoomEvent) {
        tracing::debug!(room_id = %room_id, event = event.kind(), "broadcasting room event");

        let subscribers = {
            let guard = self
                .inner
                .subscribers
                .read()
                .expect("subscriber lock poisoned");
            guard.get(room_id).cloned()
        };
        let Some(list) = subscribers else {
            tracing::trace!(room_id = %room_id, "no subscribers for room");
            return;
        };

        let mut failed = Vec::new();
        for (id, sender) in list {
            if let Err(e) = sender.try_send(event.clone()) {
                tracing::warn!(
                    room_id = %room_id,
                    subscriber_id = id,
                    error = %e,
                    "dropping subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(room_id, &failed);
        }
    }

    pub fn unsubscribe(&self, room_id: &RoomId, subscriber_id: usize) {
        self.remove_subscribers(room_id, &[subscriber_id]);
    }

    pub fn drop_room(&self, room_id: &RoomId) {
        self.inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned")
            .remove(room_id);
    }

    pub fn subscriber_count(&self) -> usize {
        let guard = self
            .inner
            .subscribers
            .read()
            .expect("subscriber lock poisoned");
        guard.values().map(Vec::len).sum()
    }

    fn remove_subscribers(&self, room_id: &RoomId, ids: &[usize]) {
        let mut guard = self
            .inner
            .subscribers
            .write()
            .expect("subscriber lock poisoned");
        if let Some(list) = guard.get_mut(room_id) {
            list.retain(|(id, _)| !ids.contains(id));
            if list.is_empty() {
                guard.remove(room_id);
            }
        }
    }
}
