use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::action::ActionRequest;
use crate::game::{GameKind, GameState};
use crate::player::{PlayerId, Seat};
use crate::rules::RoundConfig;

/// One accepted action, numbered from 1 within its round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seq: u32,
    #[serde(flatten)]
    pub request: ActionRequest,
}

/// How a finished round ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub winner: Option<PlayerId>,
    /// Chip stacks in seat order after settlement (poker and blackjack)
    #[serde(default)]
    pub chips: Vec<u32>,
    /// Cards left in each hand, in seat order
    #[serde(default)]
    pub hand_sizes: Vec<usize>,
}

impl RoundResult {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            winner: state.winner.clone(),
            chips: state.players.iter().map(|p| p.chips).collect(),
            hand_sizes: state.players.iter().map(|p| p.hand.len()).collect(),
        }
    }
}

/// Everything needed to replay a round: the seed and seats reproduce the
/// deal and the actions reproduce the play.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_id: String,
    pub game: GameKind,
    pub round: u32,
    pub seed: u64,
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub config: RoundConfig,
    pub actions: Vec<ActionRecord>,
    #[serde(default)]
    pub result: Option<RoundResult>,
    /// RFC3339, filled in when the record is written
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn new(game: GameKind, round: u32, seed: u64, seats: &[Seat], config: RoundConfig) -> Self {
        Self {
            round_id: uuid::Uuid::new_v4().to_string(),
            game,
            round,
            seed,
            seats: seats.to_vec(),
            config,
            actions: Vec::new(),
            result: None,
            ts: None,
        }
    }
}

/// Appends round records to a JSONL file.
pub struct RoundLogger {
    writer: BufWriter<File>,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Reads every record from a JSONL file, skipping blank lines.
pub fn read_records<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<RoundRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line).map_err(std::io::Error::other)?);
    }
    Ok(records)
}
