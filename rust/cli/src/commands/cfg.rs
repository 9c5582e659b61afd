//! `cfg`: print the resolved configuration as JSON, each value paired with
//! the layer it came from (`default`, `file` or `env`).

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "starting_chips": {
            "value": config.starting_chips,
            "source": sources.starting_chips,
        },
        "blackjack_bet": {
            "value": config.blackjack_bet,
            "source": sources.blackjack_bet,
        },
        "uno_stacking": {
            "value": config.uno_stacking,
            "source": sources.uno_stacking,
        },
        "schwimmen_three_aces": {
            "value": config.schwimmen_three_aces,
            "source": sources.schwimmen_three_aces,
        },
        "schwimmen_fire_ends_round": {
            "value": config.schwimmen_fire_ends_round,
            "source": sources.schwimmen_fire_ends_round,
        },
        "reshuffle_discard": {
            "value": config.reshuffle_discard,
            "source": sources.reshuffle_discard,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
