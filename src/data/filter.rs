use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, FilterField};

// ---------------------------------------------------------------------------
// Selection: which values are allowed per dimension
// ---------------------------------------------------------------------------

/// Per-dimension allow-lists used to derive a filtered view.
///
/// Semantics: a record passes when every dimension's value is in the
/// corresponding set (AND across dimensions, OR within a set). An empty
/// set on any dimension therefore excludes everything; there is no
/// implicit select-all fallback here. Callers wanting "no restriction"
/// start from [`Selection::all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    allowed: BTreeMap<FilterField, BTreeSet<String>>,
}

impl Selection {
    /// The full selection: every distinct value of every dimension.
    pub fn all(dataset: &Dataset) -> Self {
        let allowed = FilterField::ALL
            .iter()
            .map(|&f| (f, dataset.distinct_values(f).clone()))
            .collect();
        Selection { allowed }
    }

    /// Allowed values for one dimension.
    pub fn values(&self, field: FilterField) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.allowed.get(&field).unwrap_or(&EMPTY)
    }

    pub fn contains(&self, field: FilterField, value: &str) -> bool {
        self.values(field).contains(value)
    }

    /// Toggle a single value in a dimension's allow-list.
    pub fn toggle(&mut self, field: FilterField, value: &str) {
        let set = self.allowed.entry(field).or_default();
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    /// Allow every distinct value of one dimension.
    pub fn select_all(&mut self, dataset: &Dataset, field: FilterField) {
        self.allowed
            .insert(field, dataset.distinct_values(field).clone());
    }

    /// Clear a dimension's allow-list (excludes every record).
    pub fn select_none(&mut self, field: FilterField) {
        self.allowed.insert(field, BTreeSet::new());
    }
}

// ---------------------------------------------------------------------------
// Filtered view derivation
// ---------------------------------------------------------------------------

/// Return indices of records passing all three dimension filters.
///
/// Recomputed from scratch on every call; the result never aliases
/// mutable state, so independent sessions can filter the same dataset
/// concurrently.
pub fn apply(dataset: &Dataset, selection: &Selection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            FilterField::ALL
                .iter()
                .all(|&field| selection.contains(field, field.value(rec)))
        })
        .map(|(i, _)| i)
        .collect()
}
