//! Append-only merge of a user's past-project history.

use std::collections::HashSet;

use crate::types::DbId;

/// Ids from `incoming` that are not yet in `existing`, in input order.
///
/// Duplicates inside `incoming` collapse to their first occurrence, so
/// appending the result to `existing` is the order-preserving union and
/// repeating the same input yields nothing new. The store performs the
/// same filter again at write time against the row it actually holds.
pub fn past_project_additions(existing: &[DbId], incoming: &[DbId]) -> Vec<DbId> {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    incoming
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<DbId> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn only_unseen_ids_are_added() {
        let added = past_project_additions(&ids(&["a", "b"]), &ids(&["c", "a", "d"]));
        assert_eq!(added, ids(&["c", "d"]));
    }

    #[test]
    fn duplicates_in_input_collapse() {
        let added = past_project_additions(&[], &ids(&["x", "x", "y", "x"]));
        assert_eq!(added, ids(&["x", "y"]));
    }

    #[test]
    fn repeating_a_merge_adds_nothing() {
        let mut history = ids(&["a"]);
        history.extend(past_project_additions(&history, &ids(&["b", "c"])));
        assert_eq!(history, ids(&["a", "b", "c"]));
        assert!(past_project_additions(&history, &ids(&["b", "c"])).is_empty());
    }

    #[test]
    fn empty_input_adds_nothing() {
        assert!(past_project_additions(&ids(&["a"]), &[]).is_empty());
    }
}
