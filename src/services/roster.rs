use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::models::{Participant, RosterRow};

/// Errors that can occur while reading a roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Unsupported roster format: {0}")]
    UnsupportedFormat(String),
}

/// Load a roster from a `.csv` or `.json` file
///
/// The position of each row becomes the participant index.
pub fn load_roster(path: &Path) -> Result<Vec<Participant>, RosterError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let file = File::open(path)?;
    let participants = match extension.as_str() {
        "csv" => read_csv(file)?,
        "json" => read_json(file)?,
        other => return Err(RosterError::UnsupportedFormat(other.to_string())),
    };

    tracing::info!("Registered {} persons for matching from {}", participants.len(), path.display());
    Ok(participants)
}

/// Parse CSV rows with a header line
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Participant>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.deserialize::<RosterRow>() {
        rows.push(record?);
    }

    into_participants(rows)
}

/// Parse a JSON array of rows
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Participant>, RosterError> {
    let rows: Vec<RosterRow> = serde_json::from_reader(reader)?;
    into_participants(rows)
}

fn into_participants(rows: Vec<RosterRow>) -> Result<Vec<Participant>, RosterError> {
    rows.into_iter()
        .enumerate()
        .map(|(row, record)| {
            record.validate().map_err(|e| RosterError::InvalidRow {
                row,
                message: e.to_string(),
            })?;
            let participant = record
                .into_participant()
                .map_err(|message| RosterError::InvalidRow { row, message })?;
            tracing::debug!("{} {:?}", row, participant);
            Ok(participant)
        })
        .collect()
}
