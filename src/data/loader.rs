use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures: the source is unreadable or the schema is wrong.
///
/// Malformed individual fields are not errors. They are recovered by
/// substituting sentinels, so a partially dirty file still loads in full.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("input is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Header names the input table must carry, in schema order.
/// The export encoder writes the same header, so exports re-load cleanly.
pub const COLUMNS: [&str; 8] = [
    "Order ID",
    "Order Date",
    "Category",
    "Sub-Category",
    "Segment",
    "Region",
    "Sales",
    "Profit",
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the sales dataset from a delimited-text file.
///
/// The Superstore source data is ISO-8859-1 encoded; input that is not
/// valid UTF-8 is decoded byte-for-byte as Latin-1 instead of aborting.
pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut raw = Vec::new();
    std::fs::File::open(path)?.read_to_end(&mut raw)?;
    read_dataset(&raw)
}

/// Parse an in-memory byte buffer with the same rules as [`load_csv`].
pub fn read_dataset(raw: &[u8]) -> Result<Dataset, LoadError> {
    let text = decode_text(raw);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut column_idx = [0usize; COLUMNS.len()];
    for (slot, &name) in column_idx.iter_mut().zip(COLUMNS.iter()) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))?;
    }
    let [id_idx, date_idx, cat_idx, sub_idx, seg_idx, reg_idx, sales_idx, profit_idx] =
        column_idx;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        records.push(Record {
            order_id: field(id_idx).to_string(),
            order_date: parse_date(field(date_idx)),
            category: field(cat_idx).to_string(),
            sub_category: field(sub_idx).to_string(),
            segment: field(seg_idx).to_string(),
            region: field(reg_idx).to_string(),
            sales: parse_amount(field(sales_idx)),
            profit: parse_amount(field(profit_idx)),
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Field parsing – sentinel recovery, never fails
// ---------------------------------------------------------------------------

/// Decode UTF-8, falling back to Latin-1 (each byte is its own code point)
/// when the buffer is not UTF-8 clean.
fn decode_text(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}

/// Parse a numeric amount; missing or malformed values become `0.0`.
fn parse_amount(s: &str) -> f64 {
    s.parse::<f64>().unwrap_or(0.0)
}

/// Parse an order date; accepts the source data's `%m/%d/%Y` and the
/// export format `%Y-%m-%d`. Failures become the epoch sentinel.
fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Row ID,Order ID,Order Date,Category,Sub-Category,Segment,Region,Sales,Profit
1,CA-2016-100001,11/08/2016,Furniture,Bookcases,Consumer,East,261.96,41.91
2,CA-2016-100001,11/08/2016,Furniture,Chairs,Consumer,East,731.94,-12.03
3,US-2017-200002,06/12/2017,Technology,Phones,Corporate,West,907.15,90.72
";

    #[test]
    fn loads_all_rows_with_typed_fields() {
        let ds = read_dataset(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.records[0];
        assert_eq!(first.order_id, "CA-2016-100001");
        assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
        assert_eq!(first.sub_category, "Bookcases");
        assert_eq!(first.sales, 261.96);
        assert_eq!(ds.records[1].profit, -12.03);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let err = read_dataset(b"Order ID,Order Date,Category\nA,01/01/2017,Furniture\n")
            .unwrap_err();
        match err {
            LoadError::MissingColumn(name) => assert_eq!(name, "Sub-Category"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn malformed_fields_fall_back_to_sentinels() {
        let data = "\
Order ID,Order Date,Category,Sub-Category,Segment,Region,Sales,Profit
A,not-a-date,Furniture,Chairs,Consumer,East,oops,
";
        let ds = read_dataset(data.as_bytes()).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.order_date, NaiveDate::default());
        assert_eq!(rec.sales, 0.0);
        assert_eq!(rec.profit, 0.0);
    }

    #[test]
    fn short_rows_fill_missing_categoricals_with_empty_string() {
        let data = "\
Order ID,Order Date,Category,Sub-Category,Segment,Region,Sales,Profit
A,01/05/2017,Furniture
";
        let ds = read_dataset(data.as_bytes()).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.segment, "");
        assert_eq!(rec.region, "");
        assert_eq!(rec.sales, 0.0);
    }

    #[test]
    fn latin1_bytes_do_not_abort_the_load() {
        let mut data = Vec::new();
        data.extend_from_slice(
            b"Order ID,Order Date,Category,Sub-Category,Segment,Region,Sales,Profit\n",
        );
        // 0xE9 is 'e' with acute accent in ISO-8859-1, invalid as UTF-8.
        data.extend_from_slice(b"A,01/05/2017,Caf\xE9,Chairs,Consumer,East,10.0,1.0\n");

        let ds = read_dataset(&data).unwrap();
        assert_eq!(ds.records[0].category, "Café");
    }

    #[test]
    fn accepts_iso_dates_from_exports() {
        let data = "\
Order ID,Order Date,Category,Sub-Category,Segment,Region,Sales,Profit
A,2016-11-08,Furniture,Chairs,Consumer,East,10.0,1.0
";
        let ds = read_dataset(data.as_bytes()).unwrap();
        assert_eq!(
            ds.records[0].order_date,
            NaiveDate::from_ymd_opt(2016, 11, 8).unwrap()
        );
    }
}
