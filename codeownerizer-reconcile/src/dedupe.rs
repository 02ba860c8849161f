//! Owner deduplication.

use std::collections::HashSet;

use codeownerizer_core::types::OwnerRecord;

/// Collapse `owners` to unique raw forms, keeping the first occurrence of each
/// in its original position.
pub fn dedupe(owners: &[OwnerRecord]) -> Vec<OwnerRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(owners.len());
    owners
        .iter()
        .filter(|owner| seen.insert(owner.raw.as_str()))
        .cloned()
        .collect()
}
