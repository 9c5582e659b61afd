//! # cardroom CLI library
//!
//! Operator tools around the card room rules engine. The entry point is
//! [`run`], which parses arguments, dispatches to a subcommand and returns
//! the process exit code.
//!
//! ## Subcommands
//!
//! - `deal`: begin a round and print what every seat holds
//! - `eval`: score a poker, blackjack or Schwimmen hand from card notation
//! - `sim`: play seeded rounds through the room gate, optionally writing
//!   round records as JSONL
//! - `replay`: re-run JSONL round records and verify their results
//! - `cfg`: show the resolved configuration and value sources
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = cardroom_cli::run(
//!     ["cardroom", "eval", "--game", "blackjack", "As Kd"],
//!     &mut out,
//!     &mut err,
//! );
//! assert_eq!(code, 0);
//! assert_eq!(String::from_utf8(out).unwrap(), "Value: 21 (blackjack)\n");
//! ```

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod ui;

use cli::{CardroomCli, Commands};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_replay_command,
    handle_sim_command,
};

pub use cli::EvalGame;
pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "sim", "replay", "cfg"];

/// Parses `args` (including the program name) and runs the subcommand.
///
/// Returns [`exit_code::SUCCESS`] or [`exit_code::ERROR`]; help and version
/// output go to `out` and succeed.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CardroomCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string());
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal {
            game,
            players,
            seed,
            json,
        } => handle_deal_command(game, players, seed, json, out),
        Commands::Eval { game, cards, board } => config::load()
            .map_err(CliError::from)
            .and_then(|cfg| {
                let rules = cfg.round_config().rules;
                handle_eval_command(game, &cards, board.as_deref(), &rules, out)
            }),
        Commands::Sim {
            game,
            players,
            rounds,
            seed,
            output,
        } => handle_sim_command(game, players, rounds, seed, output.as_deref(), out, err),
        Commands::Replay { input } => handle_replay_command(&input, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn write_usage(err: &mut dyn Write, clap_message: &str) -> std::io::Result<()> {
    writeln!(err, "{}", clap_message)?;
    writeln!(err, "Cardroom CLI")?;
    writeln!(err, "Usage: cardroom <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: cardroom --help")
}
