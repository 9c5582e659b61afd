//! # cardroom-engine: Card Game Rules Core
//!
//! Deterministic rules and state transitions for UNO, Blackjack, Schwimmen,
//! Texas Hold'em and Bullshit. Given a game, a seeded deck and a sequence of
//! player actions, the engine produces the next legal state, scores hands and
//! detects the end of a round.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text notation
//! - [`deck`] - Deck construction per game, Fisher-Yates shuffle, head draws
//! - [`eval`] - Poker, Blackjack and Schwimmen hand evaluators
//! - [`turn`] - Turn order and play direction
//! - [`games`] - The five per-game state machines
//! - [`engine`] - Turn-checked dispatch and the atomic [`engine::Table`]
//! - [`action`] - Action payloads
//! - [`game`] - GameState snapshot and game kinds
//! - [`player`] - Seats and players
//! - [`rules`] - Round configuration, house rules and bet validation
//! - [`logger`] - Round records and JSONL output
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cardroom_engine::cards::parse_cards;
//! use cardroom_engine::eval::{evaluate, Category};
//!
//! let hole = parse_cards("Ah Kh").unwrap();
//! let board = parse_cards("Qh Jh 10h 2c 3d").unwrap();
//! let hand = evaluate(&hole, &board).unwrap();
//! assert_eq!(hand.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Rounds
//!
//! Every round is driven by a seeded RNG, so the same seed, seats and actions
//! reproduce the same round:
//!
//! ```rust
//! use cardroom_engine::engine::Table;
//! use cardroom_engine::game::GameKind;
//! use cardroom_engine::player::Seat;
//! use cardroom_engine::rules::RoundConfig;
//!
//! let seats = vec![Seat::new("a", "Ann"), Seat::new("b", "Bob"), Seat::new("c", "Cy")];
//! let t1 = Table::begin(GameKind::Uno, &seats, RoundConfig::default(), 1, 7).unwrap();
//! let t2 = Table::begin(GameKind::Uno, &seats, RoundConfig::default(), 1, 7).unwrap();
//! assert_eq!(t1.state(), t2.state());
//! assert_eq!(t1.state().deck.len(), 108 - 21 - 1);
//! ```

pub mod action;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod eval;
pub mod game;
pub mod games;
pub mod logger;
pub mod player;
pub mod rules;
pub mod turn;
