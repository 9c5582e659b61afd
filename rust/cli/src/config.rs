//! Configuration resolved from defaults, a TOML file named by
//! `CARDROOM_CONFIG`, then `CARDROOM_*` environment variables.

use cardroom_engine::rules::{RoundConfig, RuleOptions};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub starting_chips: u32,
    pub blackjack_bet: u32,
    pub uno_stacking: bool,
    pub schwimmen_three_aces: bool,
    pub schwimmen_fire_ends_round: bool,
    pub reshuffle_discard: bool,
}

impl Default for Config {
    fn default() -> Self {
        let round = RoundConfig::default();
        Self {
            seed: None,
            starting_chips: round.starting_chips,
            blackjack_bet: round.blackjack_bet,
            uno_stacking: round.rules.uno_stacking,
            schwimmen_three_aces: round.rules.schwimmen_three_aces,
            schwimmen_fire_ends_round: round.rules.schwimmen_fire_ends_round,
            reshuffle_discard: round.reshuffle_discard,
        }
    }
}

impl Config {
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            starting_chips: self.starting_chips,
            blackjack_bet: self.blackjack_bet,
            rules: RuleOptions {
                uno_stacking: self.uno_stacking,
                schwimmen_three_aces: self.schwimmen_three_aces,
                schwimmen_fire_ends_round: self.schwimmen_fire_ends_round,
            },
            reshuffle_discard: self.reshuffle_discard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub starting_chips: ValueSource,
    pub blackjack_bet: ValueSource,
    pub uno_stacking: ValueSource,
    pub schwimmen_three_aces: ValueSource,
    pub schwimmen_fire_ends_round: ValueSource,
    pub reshuffle_discard: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            starting_chips: ValueSource::Default,
            blackjack_bet: ValueSource::Default,
            uno_stacking: ValueSource::Default,
            schwimmen_three_aces: ValueSource::Default,
            schwimmen_fire_ends_round: ValueSource::Default,
            reshuffle_discard: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl From<ConfigError> for crate::error::CliError {
    fn from(e: ConfigError) -> Self {
        crate::error::CliError::Config(e.to_string())
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("CARDROOM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.blackjack_bet {
            cfg.blackjack_bet = v;
            sources.blackjack_bet = ValueSource::File;
        }
        if let Some(v) = f.uno_stacking {
            cfg.uno_stacking = v;
            sources.uno_stacking = ValueSource::File;
        }
        if let Some(v) = f.schwimmen_three_aces {
            cfg.schwimmen_three_aces = v;
            sources.schwimmen_three_aces = ValueSource::File;
        }
        if let Some(v) = f.schwimmen_fire_ends_round {
            cfg.schwimmen_fire_ends_round = v;
            sources.schwimmen_fire_ends_round = ValueSource::File;
        }
        if let Some(v) = f.reshuffle_discard {
            cfg.reshuffle_discard = v;
            sources.reshuffle_discard = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var("CARDROOM_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(chips) = std::env::var("CARDROOM_STARTING_CHIPS")
        && !chips.is_empty()
    {
        cfg.starting_chips = chips
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting_chips".into()))?;
        sources.starting_chips = ValueSource::Env;
    }
    if let Ok(bet) = std::env::var("CARDROOM_BLACKJACK_BET")
        && !bet.is_empty()
    {
        cfg.blackjack_bet = bet
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid blackjack_bet".into()))?;
        sources.blackjack_bet = ValueSource::Env;
    }
    if let Ok(stacking) = std::env::var("CARDROOM_UNO_STACKING")
        && !stacking.is_empty()
    {
        cfg.uno_stacking = parse_bool(&stacking)
            .ok_or_else(|| ConfigError::Invalid("Invalid uno_stacking".into()))?;
        sources.uno_stacking = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    blackjack_bet: Option<u32>,
    #[serde(default)]
    uno_stacking: Option<bool>,
    #[serde(default)]
    schwimmen_three_aces: Option<bool>,
    #[serde(default)]
    schwimmen_fire_ends_round: Option<bool>,
    #[serde(default)]
    reshuffle_discard: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.round_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {e}")))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
