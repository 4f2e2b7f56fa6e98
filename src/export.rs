use crate::models::{value_text, ComparisonRow};
use csv::Writer;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

const HEADER: [&str; 10] = [
    "PO Item",
    "PO Qty",
    "PO Price",
    "PO Total",
    "Invoice Item",
    "Invoice Qty",
    "Invoice Price",
    "Invoice Total",
    "Status",
    "Match Score",
];

/// Renders comparison rows as a CSV document, header first.
pub fn rows_to_csv(rows: &[ComparisonRow]) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = Writer::from_writer(Vec::new());
    write_rows(&mut writer, rows)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes comparison rows to a CSV file.
pub fn export_to_csv(
    rows: &[ComparisonRow],
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);
    write_rows(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}

fn write_rows<W: std::io::Write>(writer: &mut Writer<W>, rows: &[ComparisonRow]) -> Result<(), csv::Error> {
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(&[
            row.po_description.clone(),
            option_to_csv(&row.po_qty),
            option_to_csv(&row.po_price),
            option_to_csv(&row.po_total),
            row.invoice_description.clone(),
            option_to_csv(&row.invoice_qty),
            option_to_csv(&row.invoice_price),
            option_to_csv(&row.invoice_total),
            row.status.to_string(),
            format!("{:.2}", row.match_score),
        ])?;
    }
    Ok(())
}

/// Absent pass-through values become empty cells.
fn option_to_csv(val: &Option<Value>) -> String {
    val.as_ref().map(value_text).unwrap_or_default()
}
