//! Per-game state machines. Each module deals its round in `begin`, applies
//! one turn-checked action in `apply`, and lists moves in `legal_actions`.

pub mod blackjack;
pub mod bullshit;
pub mod poker;
pub mod schwimmen;
pub mod uno;
