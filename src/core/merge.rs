// SettingsVault - core/merge.rs
//
// Combining a loaded profile payload with the host's live settings.
// Core layer: pure functions, no I/O.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// How a loaded payload is applied to existing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Add the loaded entries after the existing ones.
    Append,
    /// Discard existing settings and use the loaded payload.
    #[default]
    Replace,
}

/// Identity of a list entry for de-duplication during `Append`.
///
/// Each payload entry type decides what makes two entries "the same";
/// a bill is keyed by its recipe, an operation by recipe and body part.
pub trait NaturalKey {
    type Key: Eq + Hash;

    fn natural_key(&self) -> Self::Key;
}

/// A payload that can be applied onto existing settings.
pub trait Mergeable: Sized {
    /// Combine `self` (existing) with `incoming`, keeping existing content first.
    fn append(self, incoming: Self) -> Self;

    /// Apply `incoming` over `self`. Payloads carrying identity of their own
    /// (a policy label) override this to keep it.
    fn replace(self, incoming: Self) -> Self {
        incoming
    }
}

impl<T: NaturalKey> Mergeable for Vec<T> {
    fn append(self, incoming: Self) -> Self {
        append_by_key(self, incoming, T::natural_key)
    }
}

/// Apply `incoming` to `existing` according to `mode`.
pub fn merge_payload<P: Mergeable>(existing: P, incoming: P, mode: MergeMode) -> P {
    match mode {
        MergeMode::Replace => existing.replace(incoming),
        MergeMode::Append => existing.append(incoming),
    }
}

/// Concatenate `incoming` onto `existing`, skipping incoming entries whose key
/// is already present in `existing` or earlier in `incoming`.
///
/// Existing entries are kept untouched and in order, including any duplicates
/// they already contain.
pub fn append_by_key<T, K, F>(existing: Vec<T>, incoming: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen: HashSet<K> = existing.iter().map(&key).collect();
    let mut merged = existing;
    merged.reserve(incoming.len());
    for entry in incoming {
        if seen.insert(key(&entry)) {
            merged.push(entry);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: &'static str,
        count: u32,
    }

    impl NaturalKey for Entry {
        type Key = &'static str;

        fn natural_key(&self) -> Self::Key {
            self.id
        }
    }

    fn e(id: &'static str, count: u32) -> Entry {
        Entry { id, count }
    }

    #[test]
    fn test_append_dedups_and_preserves_order() {
        let existing = vec![e("A", 1), e("B", 1)];
        let incoming = vec![e("B", 9), e("C", 1)];
        let merged = merge_payload(existing, incoming, MergeMode::Append);
        let ids: Vec<_> = merged.iter().map(|x| x.id).collect();
        assert_eq!(ids, ["A", "B", "C"]);
        // The existing B wins over the incoming one.
        assert_eq!(merged[1].count, 1);
    }

    #[test]
    fn test_replace_returns_incoming_unchanged() {
        let incoming = vec![e("C", 3), e("C", 4)];
        let merged = merge_payload(vec![e("A", 1)], incoming.clone(), MergeMode::Replace);
        assert_eq!(merged, incoming);
    }

    #[test]
    fn test_append_dedups_within_incoming() {
        let merged = merge_payload(vec![], vec![e("X", 1), e("X", 2), e("Y", 1)], MergeMode::Append);
        assert_eq!(merged, vec![e("X", 1), e("Y", 1)]);
    }

    #[test]
    fn test_append_keeps_existing_duplicates() {
        let merged = merge_payload(vec![e("A", 1), e("A", 2)], vec![e("A", 3)], MergeMode::Append);
        assert_eq!(merged, vec![e("A", 1), e("A", 2)]);
    }

    #[test]
    fn test_append_by_custom_key() {
        let merged = append_by_key(vec![e("A", 1)], vec![e("B", 1), e("C", 2)], |x| x.count);
        assert_eq!(merged, vec![e("A", 1), e("C", 2)]);
    }

    #[test]
    fn test_merge_mode_default_is_replace() {
        assert_eq!(MergeMode::default(), MergeMode::Replace);
    }
}
