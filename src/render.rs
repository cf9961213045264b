//! Rendering of built tables
//!
//! Serialization belongs to the caller; these helpers produce the encodings
//! the experiment dashboard consumes:
//!
//! - CSV-style text (`,` between cells, `\n` between rows)
//! - that text wrapped as a JSON string
//! - Arrow `RecordBatch` (one `Utf8` column per header cell) for columnar
//!   consumers
//!
//! Cells are written verbatim; names and values are not quoted or escaped.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::matrix::PivotTable;
use crate::timeseries::{MetricTimeSeries, TIME_SERIES_HEADER};
use crate::Result;

/// Join cells with `,` and rows with `\n` (no trailing newline).
#[must_use]
pub fn to_csv_text(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pivot table as text: header line, then one line per trial.
#[must_use]
pub fn pivot_to_csv(table: &PivotTable) -> String {
    to_csv_text(&table.rows())
}

/// Time series as text: every line, the last included, ends with `\n`.
#[must_use]
pub fn series_to_csv(series: &MetricTimeSeries) -> String {
    series
        .rows()
        .iter()
        .map(|row| row.join(",") + "\n")
        .collect()
}

/// Encode text as a JSON string literal.
///
/// # Errors
///
/// Returns [`crate::Error::Serialization`] if encoding fails.
pub fn to_json_string(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?)
}

/// Pivot table as an Arrow batch.
///
/// The trial-id and state columns are non-null; empty metric and parameter
/// cells become nulls.
///
/// # Errors
///
/// Returns [`crate::Error::Arrow`] if the batch cannot be assembled.
pub fn pivot_to_record_batch(table: &PivotTable) -> Result<RecordBatch> {
    let header = table.header();
    let rows = table.pivot_rows();

    let mut fields = Vec::with_capacity(header.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(header.len());

    fields.push(Field::new(&header[0], DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(|row| row.trial_id()),
    )));
    fields.push(Field::new(&header[1], DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from_iter_values(
        rows.iter().map(|row| row.state()),
    )));

    for (offset, name) in header[2..].iter().enumerate() {
        fields.push(Field::new(name, DataType::Utf8, true));
        let values: Vec<Option<&str>> = rows
            .iter()
            .map(|row| Some(row.cells()[offset].as_str()).filter(|cell| !cell.is_empty()))
            .collect();
        columns.push(Arc::new(StringArray::from(values)));
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Time series as an Arrow batch with columns `metricName,time,value`.
///
/// # Errors
///
/// Returns [`crate::Error::Arrow`] if the batch cannot be assembled.
pub fn series_to_record_batch(series: &MetricTimeSeries) -> Result<RecordBatch> {
    let points = series.points();
    let schema = Schema::new(
        TIME_SERIES_HEADER
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    );
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(
            points.iter().map(|p| p.metric_name()),
        )),
        Arc::new(StringArray::from_iter_values(
            points.iter().map(|p| p.normalized_timestamp()),
        )),
        Arc::new(StringArray::from_iter_values(points.iter().map(|p| p.value()))),
    ];

    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}
