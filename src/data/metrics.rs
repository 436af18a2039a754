use std::collections::HashSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Scalar KPIs over a filtered view. Sums are exact; rounding happens at
/// the presentation layer only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    /// Unique order identifiers in the view, not the record count: one
    /// order may span multiple lines.
    pub distinct_orders: usize,
}

/// Compute the KPI summary for a view. An empty view yields all zeros.
pub fn summarize(dataset: &Dataset, view: &[usize]) -> Kpis {
    let mut kpis = Kpis::default();
    let mut orders: HashSet<&str> = HashSet::new();

    for &idx in view {
        let rec = &dataset.records[idx];
        kpis.total_sales += rec.sales;
        kpis.total_profit += rec.profit;
        orders.insert(rec.order_id.as_str());
    }
    kpis.distinct_orders = orders.len();
    kpis
}
