use crate::data::aggregate::{
    AggregateTable, category_sales, monthly_sales, profit_ratio_by_category, segment_profit,
    sub_category_profit,
};
use crate::data::filter::{Selection, apply};
use crate::data::metrics::{Kpis, summarize};
use crate::data::model::{Dataset, FilterField};

// ---------------------------------------------------------------------------
// Derived dashboard state
// ---------------------------------------------------------------------------

/// Everything the central panel renders, recomputed in one pass from the
/// current filtered view.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub kpis: Kpis,
    pub monthly_sales: AggregateTable,
    pub category_sales: AggregateTable,
    /// Sorted descending by profit.
    pub sub_category_profit: AggregateTable,
    pub segment_profit: AggregateTable,
    pub profit_ratio_by_category: AggregateTable,
}

impl Dashboard {
    pub fn compute(dataset: &Dataset, view: &[usize]) -> Self {
        Dashboard {
            kpis: summarize(dataset, view),
            monthly_sales: monthly_sales(dataset, view),
            category_sales: category_sales(dataset, view),
            sub_category_profit: sub_category_profit(dataset, view),
            segment_profit: segment_profit(dataset, view),
            profit_ratio_by_category: profit_ratio_by_category(dataset, view),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset handle is single-assignment per load: filter changes only
/// ever touch `selection` and the derived caches.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Current per-dimension allow-lists.
    pub selection: Selection,

    /// Indices of records passing the current selection (cached).
    pub visible: Vec<usize>,

    /// KPIs and aggregate tables for the current view (cached).
    pub dashboard: Dashboard,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection::default(),
            visible: Vec::new(),
            dashboard: Dashboard::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: default to the full selection and
    /// compute the initial dashboard.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = Selection::all(&dataset);
        self.visible = (0..dataset.len()).collect();
        self.dashboard = Dashboard::compute(&dataset, &self.visible);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute the view and every derived table after a filter change.
    /// Synchronous and total: no partial results are ever visible.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible = apply(ds, &self.selection);
            self.dashboard = Dashboard::compute(ds, &self.visible);
        }
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, field: FilterField, value: &str) {
        self.selection.toggle(field, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, field: FilterField) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(ds, field);
        }
        self.refilter();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, field: FilterField) {
        self.selection.select_none(field);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Dataset::from_records(vec![
            record("A", "Furniture", "Consumer", "East", 100.0, 10.0),
            record("A", "Furniture", "Consumer", "East", 50.0, -5.0),
            record("B", "Technology", "Corporate", "West", 200.0, 40.0),
        ]));
        state
    }

    #[test]
    fn set_dataset_defaults_to_full_view() {
        let state = loaded_state();
        assert_eq!(state.visible, vec![0, 1, 2]);
        assert_eq!(state.dashboard.kpis.total_sales, 350.0);
        assert_eq!(state.dashboard.kpis.distinct_orders, 2);
    }

    #[test]
    fn toggling_a_value_recomputes_everything() {
        let mut state = loaded_state();
        state.toggle_filter_value(FilterField::Category, "Technology");

        assert_eq!(state.visible, vec![0, 1]);
        assert_eq!(state.dashboard.kpis.total_sales, 150.0);
        assert_eq!(
            state.dashboard.category_sales,
            vec![("Furniture".to_string(), 150.0)]
        );
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = loaded_state();
        state.select_none(FilterField::Region);
        assert!(state.visible.is_empty());
        assert_eq!(state.dashboard.kpis, Kpis::default());
        assert!(state.dashboard.sub_category_profit.is_empty());

        state.select_all(FilterField::Region);
        assert_eq!(state.visible, vec![0, 1, 2]);
        assert_eq!(state.dashboard.kpis.total_profit, 45.0);
    }
}
