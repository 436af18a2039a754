use thiserror::Error;

use super::loader::COLUMNS;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// CSV export of a filtered view
// ---------------------------------------------------------------------------

/// Export failures. Fatal only to the single export request; in-memory
/// state is untouched.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("encoding CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("writing CSV buffer: {0}")]
    Io(#[from] std::io::Error),
}

/// Default file name offered for the exported view.
pub const EXPORT_FILE_NAME: &str = "filtered_store_sales.csv";

/// Serialize the view to UTF-8 CSV bytes.
///
/// The header matches the loader's schema column order and dates are
/// written as `%Y-%m-%d`, so the output re-loads through [`read_dataset`]
/// (round-trip fidelity modulo number formatting — f64 `Display` is
/// shortest-round-trip, so sums survive exactly).
///
/// [`read_dataset`]: super::loader::read_dataset
pub fn encode(dataset: &Dataset, view: &[usize]) -> Result<Vec<u8>, EncodeError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;

    for &idx in view {
        let rec = &dataset.records[idx];
        let date = rec.order_date.format("%Y-%m-%d").to_string();
        let sales = rec.sales.to_string();
        let profit = rec.profit.to_string();
        writer.write_record([
            rec.order_id.as_str(),
            date.as_str(),
            rec.category.as_str(),
            rec.sub_category.as_str(),
            rec.segment.as_str(),
            rec.region.as_str(),
            sales.as_str(),
            profit.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}
