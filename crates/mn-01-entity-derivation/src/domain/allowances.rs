//! # Allowance Reconciliation
//!
//! A single approve/adjust transaction may declare the same allowance key
//! more than once; the protocol applies the entries in order, so the last
//! declared entry is the one in effect.
//!
//! ## Algorithm
//!
//! 1. Walk the batch in reverse (last declared entry first).
//! 2. Compute each entry's key; an entry without a key is dropped.
//! 3. Keep the first occurrence of every key, discard the rest.
//!
//! One pass, memory linear in the number of distinct keys. Survivors are
//! returned in processing order, which is the order they are emitted in.

use std::collections::HashSet;
use std::hash::Hash;

/// Keep the last-declared entry per key, in reverse declaration order.
///
/// `key` returns `Ok(None)` to drop an entry (e.g. an owner that could not
/// be resolved) and `Err` to abort the whole batch.
pub fn reconcile_last_wins<T, K, E, F>(entries: &[T], mut key: F) -> Result<Vec<(K, &T)>, E>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Result<Option<K>, E>,
{
    let mut seen = HashSet::with_capacity(entries.len());
    let mut survivors = Vec::new();

    for entry in entries.iter().rev() {
        let Some(entry_key) = key(entry)? else {
            continue;
        };
        if seen.insert(entry_key.clone()) {
            survivors.push((entry_key, entry));
        }
    }

    Ok(survivors)
}
