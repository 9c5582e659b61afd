//! `deal`: begin one round and show what every seat was dealt.

use crate::commands::default_seats;
use crate::config;
use crate::error::CliError;
use crate::ui::format_cards;
use cardroom_engine::engine::Table;
use cardroom_engine::game::{GameKind, Variant};
use std::io::Write;

/// Deals round 1 of `game` for `players` seats. The seed comes from the
/// argument, then the configuration, then the OS.
pub fn handle_deal_command(
    game: GameKind,
    players: usize,
    seed: Option<u64>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let table = Table::begin(game, &default_seats(players), cfg.round_config(), 1, seed)?;
    let state = table.state();

    if json {
        let body = serde_json::to_string_pretty(state).map_err(std::io::Error::other)?;
        writeln!(out, "{}", body)?;
        return Ok(());
    }

    writeln!(out, "Game: {} (seed {})", game, seed)?;
    for p in &state.players {
        write!(out, "{}: {}", p.id, format_cards(&p.hand))?;
        if p.chips > 0 || p.bet > 0 {
            write!(out, " [chips {}, bet {}]", p.chips, p.bet)?;
        }
        writeln!(out)?;
    }
    match &state.variant {
        Variant::Uno(uno) => {
            writeln!(out, "Discard: {}", format_cards(&state.pile))?;
            writeln!(out, "Color: {:?}", uno.color)?;
        }
        Variant::Blackjack(bj) => {
            let up: Vec<_> = bj.dealer.hand.iter().filter(|c| c.face_up).copied().collect();
            writeln!(out, "Dealer: {}", format_cards(&up))?;
        }
        Variant::Schwimmen(_) => writeln!(out, "Table: {}", format_cards(&state.pile))?,
        Variant::Poker(_) | Variant::Bullshit(_) => {}
    }
    writeln!(out, "Deck: {} cards", state.deck.len())?;
    if let Some(current) = state.current_player() {
        writeln!(out, "To act: {}", current.id)?;
    } else if state.is_finished() {
        writeln!(out, "Round already settled")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_deal() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        handle_deal_command(GameKind::Uno, 3, Some(12345), false, &mut out1).unwrap();
        handle_deal_command(GameKind::Uno, 3, Some(12345), false, &mut out2).unwrap();
        assert_eq!(out1, out2);
    }

    #[test]
    fn poker_deal_lists_every_seat() {
        let mut out = Vec::new();
        handle_deal_command(GameKind::Poker, 4, Some(9), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Game: poker (seed 9)"));
        for id in ["p1:", "p2:", "p3:", "p4:"] {
            assert!(text.contains(id), "missing {id} in {text}");
        }
        assert!(text.contains("Deck: 44 cards"));
        assert!(text.contains("To act: p1"));
    }

    #[test]
    fn json_output_is_a_snapshot() {
        let mut out = Vec::new();
        handle_deal_command(GameKind::Schwimmen, 2, Some(4), true, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["game"], "schwimmen");
        assert_eq!(json["players"].as_array().unwrap().len(), 2);
        assert_eq!(json["pile"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn too_many_seats_fail() {
        let mut out = Vec::new();
        let err = handle_deal_command(GameKind::Blackjack, 8, Some(1), false, &mut out);
        assert!(matches!(err, Err(CliError::Engine(_))));
    }
}
