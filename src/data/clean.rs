use crate::error::ReportError;
use crate::settings::ReportSettings;

use super::model::{CellValue, DataTable, Dtype};

/// Outcome of the fixed cleaning steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Cleaned {
    pub table: DataTable,
    /// Whether the amount column existed and was converted to integer.
    pub amount_converted: bool,
}

/// Derive the cleaned dataset: drop the configured columns, drop rows with
/// a missing value, then coerce the amount column to integer.
pub fn clean_dataset(uploaded: &DataTable, settings: &ReportSettings) -> Result<Cleaned, ReportError> {
    let mut table = drop_missing(&drop_columns(uploaded, &settings.dropped_columns));
    let amount_converted = coerce_to_int(&mut table, &settings.amount_column)?;
    log::debug!(
        "cleaned {:?} -> {:?}, amount converted: {amount_converted}",
        uploaded.shape(),
        table.shape()
    );
    Ok(Cleaned { table, amount_converted })
}

// ---------------------------------------------------------------------------
// Column / row cleaning
// ---------------------------------------------------------------------------

/// Remove the named columns that exist in the table; absent names are ignored.
pub fn drop_columns(table: &DataTable, names: &[String]) -> DataTable {
    DataTable {
        columns: table
            .columns
            .iter()
            .filter(|c| !names.iter().any(|n| *n == c.name))
            .cloned()
            .collect(),
        index: table.index.clone(),
    }
}

/// Return positions of rows without a missing value in any column.
pub fn complete_rows(table: &DataTable) -> Vec<usize> {
    (0..table.len())
        .filter(|&pos| table.row(pos).all(|v| !v.is_missing()))
        .collect()
}

/// Drop every row that has a missing value in any column.
pub fn drop_missing(table: &DataTable) -> DataTable {
    table.take_rows(&complete_rows(table))
}

// ---------------------------------------------------------------------------
// Integer coercion
// ---------------------------------------------------------------------------

/// Convert `column` to `int64` in place. Does nothing if the column is absent.
///
/// Floats truncate toward zero, booleans become 0/1, text must parse as an
/// integer. The first value that cannot be converted aborts the whole call.
pub fn coerce_to_int(table: &mut DataTable, column: &str) -> Result<bool, ReportError> {
    let index = table.index.clone();
    let Some(col) = table.column_mut(column) else {
        return Ok(false);
    };

    let mut converted = Vec::with_capacity(col.values.len());
    for (pos, value) in col.values.iter().enumerate() {
        let fail = || ReportError::Coercion {
            column: column.to_string(),
            row: index[pos],
            value: value.to_string(),
        };
        let int = match value {
            CellValue::Int(i) => *i,
            CellValue::Bool(b) => i64::from(*b),
            CellValue::Float(f) if f.is_finite() => f.trunc() as i64,
            CellValue::Str(s) => s.trim().parse::<i64>().map_err(|_| fail())?,
            CellValue::Float(_) | CellValue::Null => return Err(fail()),
        };
        converted.push(CellValue::Int(int));
    }

    col.values = converted;
    col.dtype = Dtype::Int64;
    Ok(true)
}
