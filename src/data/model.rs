use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Record – one transaction line of the source table
// ---------------------------------------------------------------------------

/// A single transaction line (one row of the source CSV).
///
/// The schema is fixed: the loader validates the required columns once and
/// normalizes unparseable fields to sentinels (`0.0` for amounts, the empty
/// string for categoricals, the epoch date for dates) instead of failing row
/// by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Order identifier. Not unique across rows: one order may span
    /// several lines.
    pub order_id: String,
    pub order_date: NaiveDate,
    pub category: String,
    pub sub_category: String,
    pub segment: String,
    pub region: String,
    /// Sales amount, non-negative in well-formed data.
    pub sales: f64,
    /// Profit amount, may be negative.
    pub profit: f64,
}

impl Record {
    /// Calendar month of the order as a `YYYY-MM` group key.
    pub fn month_key(&self) -> String {
        self.order_date.format("%Y-%m").to_string()
    }

    /// Per-record profit-to-sales ratio.
    ///
    /// Zero sales yield the IEEE result (±inf, or NaN for 0/0) rather than
    /// panicking; aggregations that average this column exclude such rows
    /// (see [`profit_ratio_by_category`](crate::data::aggregate::profit_ratio_by_category)).
    pub fn profit_ratio(&self) -> f64 {
        self.profit / self.sales
    }
}

// ---------------------------------------------------------------------------
// FilterField – the three user-filterable dimensions
// ---------------------------------------------------------------------------

/// A dimension the user can restrict with an allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterField {
    Category,
    Segment,
    Region,
}

impl FilterField {
    pub const ALL: [FilterField; 3] =
        [FilterField::Category, FilterField::Segment, FilterField::Region];

    /// Column label as shown in the UI and the CSV header.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Category => "Category",
            FilterField::Segment => "Segment",
            FilterField::Region => "Region",
        }
    }

    /// The record's value for this dimension.
    pub fn value(self, record: &Record) -> &str {
        match self {
            FilterField::Category => &record.category,
            FilterField::Segment => &record.segment,
            FilterField::Region => &record.region,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded dataset with pre-computed distinct-value indices.
///
/// Immutable after load: every user interaction derives filtered views
/// (index vectors) from it, nothing ever writes back.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// For each filterable dimension the sorted set of distinct values
    /// observed in `records` (deterministic lexicographic order).
    distinct: BTreeMap<FilterField, BTreeSet<String>>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut distinct: BTreeMap<FilterField, BTreeSet<String>> = FilterField::ALL
            .iter()
            .map(|&f| (f, BTreeSet::new()))
            .collect();

        for rec in &records {
            for (&field, values) in distinct.iter_mut() {
                values.insert(field.value(rec).to_string());
            }
        }

        Dataset { records, distinct }
    }

    /// Sorted distinct values for a dimension, for building filter controls.
    pub fn distinct_values(&self, field: FilterField) -> &BTreeSet<String> {
        // from_records always populates all three keys
        &self.distinct[&field]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
