use std::collections::HashMap;

use crate::error::ReportError;

use super::model::{CellValue, Column, DataTable, Dtype};

/// Spellings read as a missing value, matching the usual dataframe defaults.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse an uploaded CSV byte stream into a [`DataTable`].
///
/// Bytes are decoded as Latin-1, so decoding itself never fails; only the
/// CSV structure can be rejected (rows longer than the header, no header).
/// Short rows are padded with missing cells.
pub fn load_csv_bytes(bytes: &[u8]) -> Result<DataTable, ReportError> {
    let text = decode_latin1(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes));

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();
    let headers = dedupe_headers(headers);

    if headers.is_empty() {
        return Err(ReportError::NoColumns);
    }

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(ReportError::TooManyFields {
                line: record.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
        for (col_idx, cells) in raw.iter_mut().enumerate() {
            cells.push(record.get(col_idx).unwrap_or("").to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| infer_column(name, cells))
        .collect();

    Ok(DataTable::from_columns(columns))
}

/// Suffix repeated names with `.1`, `.2`, ... skipping names already taken.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|name| {
            let mut current = name;
            let mut count = seen.get(&current).copied().unwrap_or(0);
            while count > 0 {
                seen.insert(current.clone(), count + 1);
                current = format!("{current}.{count}");
                count = seen.get(&current).copied().unwrap_or(0);
            }
            seen.insert(current.clone(), count + 1);
            current
        })
        .collect()
}

/// Map every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

fn is_na(s: &str) -> bool {
    NA_VALUES.contains(&s)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Dtype inference
// ---------------------------------------------------------------------------

/// Pick the narrowest dtype that fits every cell of the column.
///
/// Integers with gaps widen to `float64` since missing cells are NaN, and
/// booleans with gaps fall back to `object`.
fn infer_column(name: String, cells: Vec<String>) -> Column {
    let present: Vec<&str> = cells
        .iter()
        .map(String::as_str)
        .filter(|s| !is_na(s))
        .collect();
    let has_missing = present.len() < cells.len();

    if present.is_empty() {
        let values = vec![CellValue::Null; cells.len()];
        return Column { name, dtype: Dtype::Float64, values };
    }

    if !has_missing && present.iter().all(|s| s.trim().parse::<i64>().is_ok()) {
        let values = cells
            .iter()
            .map(|s| s.trim().parse::<i64>().map_or(CellValue::Null, CellValue::Int))
            .collect();
        return Column { name, dtype: Dtype::Int64, values };
    }

    if present.iter().all(|s| s.trim().parse::<f64>().is_ok()) {
        let values = cells
            .iter()
            .map(|s| {
                if is_na(s) {
                    CellValue::Null
                } else {
                    s.trim().parse::<f64>().map_or(CellValue::Null, CellValue::Float)
                }
            })
            .collect();
        return Column { name, dtype: Dtype::Float64, values };
    }

    if !has_missing && present.iter().all(|s| parse_bool(s).is_some()) {
        let values = cells
            .iter()
            .map(|s| parse_bool(s).map_or(CellValue::Null, CellValue::Bool))
            .collect();
        return Column { name, dtype: Dtype::Bool, values };
    }

    let values = cells
        .into_iter()
        .map(|s| if is_na(&s) { CellValue::Null } else { CellValue::Str(s) })
        .collect();
    Column { name, dtype: Dtype::Object, values }
}
