use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{domain::LedgerRecord, errors::LedgerError, ledger::InMemoryLedger};

/// On-disk shape of a record export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub records: Vec<LedgerRecord>,
}

/// Writes the ledger's records to disk atomically by staging to a temporary file.
pub fn save_ledger_to_file(ledger: &InMemoryLedger, path: &Path) -> Result<(), LedgerError> {
    let snapshot = LedgerSnapshot {
        records: ledger.records().to_vec(),
    };
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a record snapshot from disk into an in-memory ledger.
pub fn load_ledger_from_file(path: &Path) -> Result<InMemoryLedger, LedgerError> {
    let data = fs::read_to_string(path)?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&data)?;
    InMemoryLedger::from_records(snapshot.records)
}
