//! Cross-file deduplication by RUT

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consolidate::{CanonicalRecord, ConsolidatedTable};

/// Which occurrence of a repeated RUT is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first occurrence in traversal order (default)
    #[default]
    First,
    /// Keep the last occurrence in traversal order
    Last,
}

impl DuplicatePolicy {
    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            DuplicatePolicy::First => "first occurrence wins",
            DuplicatePolicy::Last => "last occurrence wins",
        }
    }
}

/// Deduplication result
#[derive(Debug, Clone)]
pub struct Deduplicated {
    pub table: ConsolidatedTable,
    pub duplicates_dropped: usize,
}

/// Collapse records to one per RUT.
///
/// Input must be in traversal order (file, sheet, row). Output keeps the
/// order in which the surviving occurrence of each RUT appears.
pub fn deduplicate(records: Vec<CanonicalRecord>, policy: DuplicatePolicy) -> Deduplicated {
    let total = records.len();

    let kept = match policy {
        DuplicatePolicy::First => keep_first(records),
        DuplicatePolicy::Last => {
            let mut kept = keep_first(records.into_iter().rev().collect());
            kept.reverse();
            kept
        }
    };

    Deduplicated {
        duplicates_dropped: total - kept.len(),
        table: ConsolidatedTable::from_unique(kept),
    }
}

fn keep_first(records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<CanonicalRecord> = Vec::with_capacity(records.len());

    for record in records {
        match seen.get(record.rut()) {
            Some(&idx) => {
                log::debug!(
                    "Duplicate RUT {} at {} dropped, keeping {}",
                    record.rut(),
                    record.origin(),
                    kept[idx].origin()
                );
            }
            None => {
                seen.insert(record.rut().to_string(), kept.len());
                kept.push(record);
            }
        }
    }

    kept
}
