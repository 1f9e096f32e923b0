// Headless front end: feed a session from a script of JSON events, one per line.
// Blank lines and lines starting with '#' are skipped.
//
//   {"type":"select_label","label":3}
//   {"type":"pointer_down","x":140,"y":60}
//   {"type":"pointer_move","x":140,"y":220}
//   {"type":"pointer_up"}
//   {"type":"save_digit"}
//   {"type":"export"}

use crate::dataset::write_export;
use crate::error::{Error, Result};
use crate::session::{Effect, Event, Session};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// What a finished replay did.
#[derive(Debug, Default)]
pub struct ReplaySummary {
    pub events: usize,
    pub exported: Vec<PathBuf>,
}

pub fn run_file(path: &Path, session: &mut Session, out_dir: &Path) -> Result<ReplaySummary> {
    info!("Replaying events from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    run(reader, session, out_dir)
}

pub fn run<R: BufRead>(reader: R, session: &mut Session, out_dir: &Path) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') { continue; }

        let event: Event = serde_json::from_str(trimmed)
            .map_err(|e| Error::Replay { line: idx + 1, reason: e.to_string() })?;
        summary.events += 1;

        for effect in session.handle(event) {
            match effect {
                Effect::Export { file_name, csv } => {
                    summary.exported.push(write_export(out_dir, &file_name, &csv)?);
                }
                Effect::AskConfirm(question) => {
                    info!("line {}: {question} (expecting a confirm event)", idx + 1);
                }
                Effect::Alert(msg) => warn!("line {}: {msg}", idx + 1),
                other => {
                    if let Some(msg) = other.message() {
                        debug!("line {}: {msg}", idx + 1);
                    }
                }
            }
        }
    }

    info!(
        "Replay finished: {} events, {} samples in session, {} file(s) exported",
        summary.events,
        session.dataset().len(),
        summary.exported.len()
    );
    Ok(summary)
}
