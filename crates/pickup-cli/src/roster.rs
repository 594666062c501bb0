// Roster and allocation file loading (JSON request bodies, CSV exports).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use pickup_core::Allocation;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::request::BalanceRequest;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a balance request from a `.csv` roster export or a JSON file (a
/// bare player array or a `{ players, numTeams }` body).
pub fn load_request(path: &Path) -> Result<BalanceRequest, RosterError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let body = if is_csv {
        let file = open(path)?;
        Value::Array(players_from_csv(file, &path.display().to_string())?)
    } else {
        read_json(path)?
    };
    Ok(BalanceRequest::from_body(body))
}

/// Load a previously written allocation for manual adjustment.
pub fn load_allocation(path: &Path) -> Result<Allocation, RosterError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| RosterError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse roster rows from CSV. Headers are used as field names; malformed
/// rows are skipped with a warning, as are their players.
pub fn players_from_csv<R: Read>(reader: R, label: &str) -> Result<Vec<Value>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| RosterError::Csv {
            path: label.to_string(),
            source: e,
        })?
        .clone();

    let mut players = Vec::new();
    for result in rdr.records() {
        match result {
            Ok(record) => {
                let row: Map<String, Value> = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, cell)| (h.to_string(), cell_value(cell)))
                    .collect();
                players.push(Value::Object(row));
            }
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
            }
        }
    }

    info!("Loaded {} roster rows from {}", players.len(), label);
    Ok(players)
}

/// `true`/`false` become booleans, numeric cells become numbers, anything
/// else stays a string.
fn cell_value(cell: &str) -> Value {
    match cell {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::from(f),
        _ => Value::String(cell.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<File, RosterError> {
    File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_to_string(path: &Path) -> Result<String, RosterError> {
    std::fs::read_to_string(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_json(path: &Path) -> Result<Value, RosterError> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| RosterError::Json {
        path: path.display().to_string(),
        source: e,
    })
}
