//! Command-line surface of the `cardroom` binary.

use cardroom_engine::game::GameKind;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "cardroom",
    version,
    about = "Card room rules engine: deal, score, simulate and replay rounds"
)]
pub struct CardroomCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Begin a round and print the deal
    Deal {
        #[arg(long, value_parser = parse_game)]
        game: GameKind,
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the full state snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Score a hand given in card notation, e.g. "As Kh 10d"
    Eval {
        #[arg(long, value_enum)]
        game: EvalGame,
        cards: String,
        /// Poker community cards
        #[arg(long)]
        board: Option<String>,
    },
    /// Play seeded rounds through the room gate with random legal actions
    Sim {
        #[arg(long, value_parser = parse_game)]
        game: GameKind,
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: u32,
        #[arg(long)]
        seed: Option<u64>,
        /// Append round records to this JSONL file
        #[arg(long)]
        output: Option<String>,
    },
    /// Re-run recorded rounds and check they reproduce the same result
    Replay {
        #[arg(long)]
        input: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

/// Games that have a standalone hand evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EvalGame {
    Poker,
    Blackjack,
    Schwimmen,
}

fn parse_game(s: &str) -> Result<GameKind, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_parses() {
        let commands = [
            vec!["cardroom", "cfg"],
            vec!["cardroom", "deal", "--game", "uno"],
            vec!["cardroom", "eval", "--game", "poker", "As Ks"],
            vec!["cardroom", "sim", "--game", "holdem", "--rounds", "3"],
            vec!["cardroom", "replay", "--input", "rounds.jsonl"],
        ];
        for args in commands {
            assert!(CardroomCli::try_parse_from(&args).is_ok(), "{args:?}");
        }
    }

    #[test]
    fn unknown_game_is_rejected() {
        assert!(CardroomCli::try_parse_from(["cardroom", "deal", "--game", "skat"]).is_err());
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let parsed =
            CardroomCli::try_parse_from(["cardroom", "sim", "--game", "uno", "--rounds", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn deal_defaults_to_two_players() {
        let cli = CardroomCli::try_parse_from(["cardroom", "deal", "--game", "poker"]).unwrap();
        match cli.cmd {
            Commands::Deal {
                game,
                players,
                seed,
                json,
            } => {
                assert_eq!(game, GameKind::Poker);
                assert_eq!(players, 2);
                assert_eq!(seed, None);
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
