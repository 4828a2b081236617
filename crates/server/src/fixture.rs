//! Ledger fixtures loaded at startup

use std::path::{Path, PathBuf};

use prediction_facade::LedgerEntry;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read ledger fixture {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ledger fixture {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("ledger fixture {path}: entry {index} has a negative amount")]
    NegativeAmount { path: PathBuf, index: usize },
}

/// Read a JSON array of ledger entries.
pub fn load_entries(path: &Path) -> Result<Vec<LedgerEntry>, FixtureError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<LedgerEntry> =
        serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    // Amounts are magnitudes; the kind carries the direction
    if let Some(index) = entries.iter().position(|e| e.amount < 0.0) {
        return Err(FixtureError::NegativeAmount {
            path: path.to_path_buf(),
            index,
        });
    }
    Ok(entries)
}
