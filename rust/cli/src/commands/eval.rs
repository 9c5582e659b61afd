//! `eval`: score a hand written in card notation.

use crate::cli::EvalGame;
use crate::error::CliError;
use crate::ui::format_cards;
use cardroom_engine::cards::parse_cards;
use cardroom_engine::eval::{evaluate, evaluate_cards, score, value_of};
use cardroom_engine::rules::RuleOptions;
use std::io::Write;

pub fn handle_eval_command(
    game: EvalGame,
    cards: &str,
    board: Option<&str>,
    rules: &RuleOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hand = parse_cards(cards)?;
    match game {
        EvalGame::Poker => {
            let result = match board {
                Some(b) => evaluate(&hand, &parse_cards(b)?)?,
                None => evaluate_cards(&hand)?,
            };
            writeln!(out, "{}", result.describe())?;
            writeln!(out, "Best five: {}", format_cards(&result.best))?;
            writeln!(out, "Strength: {}", result.strength)?;
        }
        EvalGame::Blackjack => {
            if board.is_some() {
                return Err(CliError::InvalidInput(
                    "--board only applies to poker".into(),
                ));
            }
            let v = value_of(&hand)?;
            let mut notes = Vec::new();
            if v.is_blackjack {
                notes.push("blackjack");
            } else if v.is_soft {
                notes.push("soft");
            }
            if v.is_bust {
                notes.push("bust");
            }
            if notes.is_empty() {
                writeln!(out, "Value: {}", v.value)?;
            } else {
                writeln!(out, "Value: {} ({})", v.value, notes.join(", "))?;
            }
        }
        EvalGame::Schwimmen => {
            if board.is_some() {
                return Err(CliError::InvalidInput(
                    "--board only applies to poker".into(),
                ));
            }
            let s = score(&hand, rules)?;
            writeln!(out, "Score: {} ({})", s.score, s.description)?;
            if s.is_fire {
                writeln!(out, "Feuer!")?;
            } else if s.is_31 {
                writeln!(out, "Thirty-one!")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(game: EvalGame, cards: &str, board: Option<&str>) -> Result<String, CliError> {
        let mut out = Vec::new();
        handle_eval_command(game, cards, board, &RuleOptions::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn poker_with_board() {
        let text = eval(EvalGame::Poker, "Ah Kh", Some("Qh Jh Th 2c 3d")).unwrap();
        assert!(text.starts_with("royal flush"), "{text}");
    }

    #[test]
    fn blackjack_soft_and_natural() {
        assert_eq!(eval(EvalGame::Blackjack, "As Kd", None).unwrap(), "Value: 21 (blackjack)\n");
        assert_eq!(eval(EvalGame::Blackjack, "As 6d", None).unwrap(), "Value: 17 (soft)\n");
        assert_eq!(eval(EvalGame::Blackjack, "Ks Qd 5c", None).unwrap(), "Value: 25 (bust)\n");
    }

    #[test]
    fn schwimmen_needs_three_cards() {
        assert!(matches!(
            eval(EvalGame::Schwimmen, "As Ks", None),
            Err(CliError::InvalidInput(_))
        ));
        let text = eval(EvalGame::Schwimmen, "Ac Kc 7c", None).unwrap();
        assert!(text.starts_with("Score: 31"), "{text}");
        assert!(text.contains("Thirty-one!"));
    }

    #[test]
    fn bad_notation_is_invalid_input() {
        assert!(matches!(
            eval(EvalGame::Poker, "Zz", None),
            Err(CliError::InvalidInput(_))
        ));
    }
}
