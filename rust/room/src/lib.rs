//! # cardroom-room: the authority gate
//!
//! Owns one [`cardroom_engine::engine::Table`] per room and serializes every
//! action for that room through [`RoomRegistry::apply_action`]. Accepted
//! actions return the new snapshot; refused ones return a [`RoomError`]
//! whose [`Rejection`] can be forwarded to the client. Every change is also
//! published on the [`EventBus`] for whatever transport sits in front.
//!
//! ```rust
//! use std::sync::Arc;
//! use cardroom_engine::action::Action;
//! use cardroom_engine::game::GameKind;
//! use cardroom_engine::player::Seat;
//! use cardroom_room::{EventBus, RoomRegistry};
//!
//! let rooms = RoomRegistry::new(Arc::new(EventBus::new()));
//! let room = rooms.create_room().unwrap();
//! let seats = vec![Seat::new("a", "Ann"), Seat::new("b", "Bob")];
//! rooms.begin_round_seeded(&room, GameKind::Poker, &seats, 9).unwrap();
//!
//! let err = rooms.apply_action(&room, &"b".into(), Action::Check).unwrap_err();
//! assert_eq!(err.to_rejection().error, "invalid_turn");
//! ```

pub mod errors;
pub mod events;
pub mod logging;
pub mod rooms;
pub mod settings;

pub use errors::{Rejection, RoomError};
pub use events::{EventBus, EventSubscription, RoomEvent};
pub use logging::{init_logging, init_test_logging, LogEntry, TestLogSubscriber};
pub use rooms::{Room, RoomId, RoomRegistry};
pub use settings::{RoomSettings, SettingsError, SettingsStore};
