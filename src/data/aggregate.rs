use std::collections::BTreeMap;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// group_reduce – the one primitive every chart is built from
// ---------------------------------------------------------------------------

/// A grouped-and-reduced summary: (group key, reduced value) pairs in
/// ascending key order. Callers needing another presentation order sort
/// the table themselves, as [`sub_category_profit`] does.
pub type AggregateTable = Vec<(String, f64)>;

/// Reduction applied to each group's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    Sum,
    Mean,
    Count,
}

/// Group the view's records by `key` and reduce `value` over each group.
///
/// Groups exist only for records present in `view`, so a mean is never
/// taken over an empty group. Key order (BTreeMap) makes the output
/// deterministic across calls.
pub fn group_reduce<K, V>(
    dataset: &Dataset,
    view: &[usize],
    key: K,
    value: V,
    op: Reduce,
) -> AggregateTable
where
    K: Fn(&Record) -> String,
    V: Fn(&Record) -> f64,
{
    let mut groups: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for &idx in view {
        let rec = &dataset.records[idx];
        let entry = groups.entry(key(rec)).or_insert((0.0, 0));
        entry.0 += value(rec);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(k, (sum, n))| {
            let reduced = match op {
                Reduce::Sum => sum,
                Reduce::Mean => sum / n as f64,
                Reduce::Count => n as f64,
            };
            (k, reduced)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard tables
// ---------------------------------------------------------------------------

/// Sales summed per calendar month (`YYYY-MM`), ascending by month.
pub fn monthly_sales(dataset: &Dataset, view: &[usize]) -> AggregateTable {
    group_reduce(dataset, view, Record::month_key, |r| r.sales, Reduce::Sum)
}

/// Sales summed per category.
pub fn category_sales(dataset: &Dataset, view: &[usize]) -> AggregateTable {
    group_reduce(dataset, view, |r| r.category.clone(), |r| r.sales, Reduce::Sum)
}

/// Profit summed per sub-category, sorted descending by profit.
pub fn sub_category_profit(dataset: &Dataset, view: &[usize]) -> AggregateTable {
    let mut table = group_reduce(
        dataset,
        view,
        |r| r.sub_category.clone(),
        |r| r.profit,
        Reduce::Sum,
    );
    table.sort_by(|a, b| b.1.total_cmp(&a.1));
    table
}

/// Profit summed per customer segment.
pub fn segment_profit(dataset: &Dataset, view: &[usize]) -> AggregateTable {
    group_reduce(dataset, view, |r| r.segment.clone(), |r| r.profit, Reduce::Sum)
}

/// Mean per-record profit-to-sales ratio per category.
///
/// Records with zero sales are excluded from the mean: their ratio is
/// non-finite and a single one would poison the whole group average.
/// A category whose records all have zero sales simply does not appear.
pub fn profit_ratio_by_category(dataset: &Dataset, view: &[usize]) -> AggregateTable {
    let finite: Vec<usize> = view
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].sales != 0.0)
        .collect();
    group_reduce(
        dataset,
        &finite,
        |r| r.category.clone(),
        Record::profit_ratio,
        Reduce::Mean,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metrics::summarize;
    use crate::data::model::tests::record;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            record("A", "Furniture", "Consumer", "East", 100.0, 10.0),
            record("A", "Furniture", "Consumer", "East", 50.0, -5.0),
            record("B", "Technology", "Corporate", "West", 200.0, 40.0),
        ])
    }

    fn full_view(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn sums_profit_per_category() {
        let ds = sample();
        let table = group_reduce(
            &ds,
            &full_view(&ds),
            |r| r.category.clone(),
            |r| r.profit,
            Reduce::Sum,
        );
        assert_eq!(
            table,
            vec![("Furniture".to_string(), 5.0), ("Technology".to_string(), 40.0)]
        );
    }

    #[test]
    fn mean_and_count_reductions() {
        let ds = sample();
        let view = full_view(&ds);

        let means = group_reduce(&ds, &view, |r| r.category.clone(), |r| r.sales, Reduce::Mean);
        assert_eq!(
            means,
            vec![("Furniture".to_string(), 75.0), ("Technology".to_string(), 200.0)]
        );

        let counts =
            group_reduce(&ds, &view, |r| r.segment.clone(), |r| r.sales, Reduce::Count);
        assert_eq!(
            counts,
            vec![("Consumer".to_string(), 2.0), ("Corporate".to_string(), 1.0)]
        );
    }

    #[test]
    fn group_sums_partition_the_total() {
        let ds = sample();
        let view = full_view(&ds);
        let total = summarize(&ds, &view).total_sales;

        for table in [
            category_sales(&ds, &view),
            monthly_sales(&ds, &view),
            group_reduce(&ds, &view, |r| r.region.clone(), |r| r.sales, Reduce::Sum),
        ] {
            let sum: f64 = table.iter().map(|(_, v)| v).sum();
            assert!((sum - total).abs() < 1e-9);
        }
    }

    #[test]
    fn sub_category_ranking_is_descending() {
        let mut records = vec![
            record("A", "Furniture", "Consumer", "East", 10.0, 1.0),
            record("B", "Furniture", "Consumer", "East", 10.0, 9.0),
            record("C", "Technology", "Consumer", "East", 10.0, 5.0),
        ];
        records[0].sub_category = "Bookcases".to_string();
        records[1].sub_category = "Chairs".to_string();
        records[2].sub_category = "Phones".to_string();
        let ds = Dataset::from_records(records);

        let table = sub_category_profit(&ds, &full_view(&ds));
        let keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Chairs", "Phones", "Bookcases"]);
    }

    #[test]
    fn ratio_mean_excludes_zero_sales_records() {
        let ds = Dataset::from_records(vec![
            record("A", "Furniture", "Consumer", "East", 100.0, 50.0),
            record("B", "Furniture", "Consumer", "East", 0.0, 10.0),
            record("C", "Furniture", "Consumer", "East", 100.0, 25.0),
        ]);
        let table = profit_ratio_by_category(&ds, &full_view(&ds));
        // Mean of 0.5 and 0.25; the zero-sales row does not contribute.
        assert_eq!(table, vec![("Furniture".to_string(), 0.375)]);
    }

    #[test]
    fn all_zero_sales_category_is_absent_from_ratio_table() {
        let ds = Dataset::from_records(vec![
            record("A", "Furniture", "Consumer", "East", 0.0, 10.0),
            record("B", "Technology", "Consumer", "East", 10.0, 1.0),
        ]);
        let table = profit_ratio_by_category(&ds, &full_view(&ds));
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].0, "Technology");
    }

    #[test]
    fn empty_view_produces_empty_tables() {
        let ds = sample();
        assert!(group_reduce(&ds, &[], |r| r.category.clone(), |r| r.sales, Reduce::Mean)
            .is_empty());
        assert!(monthly_sales(&ds, &[]).is_empty());
        assert!(profit_ratio_by_category(&ds, &[]).is_empty());
    }

    #[test]
    fn monthly_keys_sort_chronologically() {
        use chrono::NaiveDate;
        let mut records = vec![
            record("A", "Furniture", "Consumer", "East", 1.0, 0.0),
            record("B", "Furniture", "Consumer", "East", 2.0, 0.0),
            record("C", "Furniture", "Consumer", "East", 4.0, 0.0),
        ];
        records[0].order_date = NaiveDate::from_ymd_opt(2017, 2, 1).unwrap();
        records[1].order_date = NaiveDate::from_ymd_opt(2016, 12, 5).unwrap();
        records[2].order_date = NaiveDate::from_ymd_opt(2017, 2, 20).unwrap();
        let ds = Dataset::from_records(records);

        let table = monthly_sales(&ds, &full_view(&ds));
        assert_eq!(
            table,
            vec![("2016-12".to_string(), 2.0), ("2017-02".to_string(), 5.0)]
        );
    }
}
