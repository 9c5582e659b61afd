//! `replay`: rebuild each recorded round from its seed and actions and check
//! that it ends the way the record says.

use crate::error::CliError;
use crate::ui;
use cardroom_engine::engine::Table;
use cardroom_engine::logger::read_records;
use chrono::DateTime;
use std::io::Write;

pub fn handle_replay_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let records = read_records(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CliError::InvalidInput(format!("{input}: file not found")),
        _ => CliError::InvalidInput(format!("{input}: {e}")),
    })?;
    if records.is_empty() {
        writeln!(out, "No rounds found in {}", input)?;
        return Ok(());
    }

    let mut mismatches = 0usize;
    for (n, record) in records.iter().enumerate() {
        let when = record
            .ts
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|t| t.format(" %Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        write!(
            out,
            "Round #{} {} seed={} actions={}{}: ",
            n + 1,
            record.game,
            record.seed,
            record.actions.len(),
            when
        )?;

        let replayed = match Table::replay(record) {
            Ok(table) => table,
            Err(e) => {
                writeln!(out, "FAILED")?;
                ui::write_error(err, &format!("round {} ({}): {}", n + 1, record.round_id, e))?;
                mismatches += 1;
                continue;
            }
        };
        if replayed.record().result == record.result {
            let winner = record
                .result
                .as_ref()
                .and_then(|r| r.winner.as_ref())
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(out, "ok (winner {})", winner)?;
        } else {
            writeln!(out, "MISMATCH")?;
            ui::write_error(
                err,
                &format!("round {} ({}) ended differently on replay", n + 1, record.round_id),
            )?;
            mismatches += 1;
        }
    }

    writeln!(out, "Replayed {} rounds, {} mismatched", records.len(), mismatches)?;
    if mismatches > 0 {
        return Err(CliError::Engine(format!(
            "{mismatches} of {} rounds did not reproduce",
            records.len()
        )));
    }
    Ok(())
}
