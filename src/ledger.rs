use tracing::info;

use crate::error::Result;
use crate::models::{Candidate, Record, Vendor};
use crate::store::LedgerStore;

pub struct MergeResult {
    pub found: usize,
    pub added: usize,
    pub skipped: usize,
}

/// Append candidates not already present by `(date, price)`, tagging each
/// with `source`. Earlier entries win, including ones added earlier in the
/// same batch. Returns how many were appended.
pub fn merge_into(ledger: &mut Vec<Record>, candidates: Vec<Candidate>, source: Vendor) -> usize {
    let mut added = 0usize;
    for candidate in candidates {
        let record = Record::from_candidate(candidate, source);
        if ledger.iter().any(|e| e.dedup_key() == record.dedup_key()) {
            continue;
        }
        ledger.push(record);
        added += 1;
    }
    added
}

/// Fold freshly extracted candidates into the persisted ledger. The store is
/// written once, and only if something was added.
pub fn merge(store: &dyn LedgerStore, candidates: Vec<Candidate>, source: Vendor) -> Result<MergeResult> {
    let found = candidates.len();
    let mut ledger = store.load()?;
    let added = merge_into(&mut ledger, candidates, source);
    if added > 0 {
        store.save(&ledger)?;
    }
    let result = MergeResult {
        found,
        added,
        skipped: found - added,
    };
    info!(vendor = %source, found, added, skipped = result.skipped, total = ledger.len(), "ledger merged");
    Ok(result)
}

/// Drop every record at once.
pub fn reset(store: &dyn LedgerStore) -> Result<()> {
    store.clear()?;
    info!("ledger cleared");
    Ok(())
}
