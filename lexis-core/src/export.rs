//! CSV and JSON encoders for tables, summaries and groups.
//!
//! These are the shapes downstream consumers expect: a two-column
//! `word,count` sheet, a `metric,value` sheet, and a `Group,Member1..` sheet.

use std::io;

use thiserror::Error;

use crate::diversity::LexicalSummary;
use crate::frequency::FrequencyTable;
use crate::roster::Group;

/// Errors raised while encoding output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    /// JSON encoding failed.
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The underlying writer failed.
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Writes `table` as CSV with a `word,count` header.
pub fn write_table_csv<W: io::Write>(
    table: &FrequencyTable,
    writer: W,
) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["word", "count"])?;
    for e in table {
        w.write_record([e.word.as_str(), e.count.to_string().as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Writes the summary rows as CSV with a `metric,value` header.
pub fn write_summary_csv<W: io::Write>(
    summary: &LexicalSummary,
    writer: W,
) -> Result<(), ExportError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["metric", "value"])?;
    for row in summary.rows() {
        w.write_record([row.label, row.value.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Writes groups as CSV: `Group,Member1..MemberK`, K being the largest group.
///
/// Smaller groups are padded with empty cells.
pub fn write_groups_csv<W: io::Write>(
    groups: &[Group],
    writer: W,
) -> Result<(), ExportError> {
    let width = groups.iter().map(|g| g.members.len()).max().unwrap_or(0);

    let mut w = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(width + 1);
    header.push("Group".to_owned());
    header.extend((1..=width).map(|i| format!("Member{i}")));
    w.write_record(&header)?;

    for g in groups {
        let mut record = Vec::with_capacity(width + 1);
        record.push(g.label());
        record.extend(g.members.iter().cloned());
        record.resize(width + 1, String::new());
        w.write_record(&record)?;
    }

    w.flush()?;
    Ok(())
}

/// Encodes any serializable result as pretty JSON.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}
