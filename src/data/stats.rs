use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt::Write as _;

use super::model::{CellValue, Column, DataTable, Dtype};

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// A small labelled grid of statistics: one row per statistic, one value
/// per described column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub columns: Vec<String>,
    pub rows: Vec<(String, Vec<CellValue>)>,
}

/// Describe the numeric columns of `table` (count, mean, std, min, quartiles,
/// max). Tables without a numeric column get the categorical summary instead.
pub fn describe(table: &DataTable) -> Summary {
    let numeric: Vec<&Column> = table
        .columns
        .iter()
        .filter(|c| c.dtype.is_numeric())
        .collect();

    if numeric.is_empty() {
        return describe_categorical(table);
    }

    const LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
    let per_column: Vec<[f64; 8]> = numeric
        .iter()
        .map(|c| numeric_summary(&c.numeric_values()))
        .collect();

    let rows = LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let values = per_column
                .iter()
                .map(|s| match i {
                    0 => CellValue::Int(s[0] as i64),
                    _ => CellValue::Float(s[i]),
                })
                .collect();
            (label.to_string(), values)
        })
        .collect();

    Summary {
        columns: numeric.iter().map(|c| c.name.clone()).collect(),
        rows,
    }
}

fn numeric_summary(values: &[f64]) -> [f64; 8] {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    [
        n,
        mean(&sorted).unwrap_or(f64::NAN),
        sample_std(&sorted).unwrap_or(f64::NAN),
        sorted.first().copied().unwrap_or(f64::NAN),
        quantile(&sorted, 0.25).unwrap_or(f64::NAN),
        quantile(&sorted, 0.50).unwrap_or(f64::NAN),
        quantile(&sorted, 0.75).unwrap_or(f64::NAN),
        sorted.last().copied().unwrap_or(f64::NAN),
    ]
}

/// count / unique / top / freq for every column.
fn describe_categorical(table: &DataTable) -> Summary {
    let mut count = Vec::new();
    let mut unique = Vec::new();
    let mut top = Vec::new();
    let mut freq = Vec::new();

    for col in &table.columns {
        let mut tally: BTreeMap<&CellValue, usize> = BTreeMap::new();
        let mut first_seen: Vec<&CellValue> = Vec::new();
        for v in col.values.iter().filter(|v| !v.is_missing()) {
            let n = tally.entry(v).or_default();
            if *n == 0 {
                first_seen.push(v);
            }
            *n += 1;
        }
        // ties go to the value that appears first in the column
        let most_common = first_seen
            .iter()
            .map(|v| (*v, tally[v]))
            .fold(None::<(&CellValue, usize)>, |best, (v, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((v, n)),
            });

        count.push(CellValue::Int(col.non_null_count() as i64));
        unique.push(CellValue::Int(tally.len() as i64));
        match most_common {
            Some((v, n)) => {
                top.push(v.clone());
                freq.push(CellValue::Int(n as i64));
            }
            None => {
                top.push(CellValue::Null);
                freq.push(CellValue::Null);
            }
        }
    }

    Summary {
        columns: table.columns.iter().map(|c| c.name.clone()).collect(),
        rows: vec![
            ("count".to_string(), count),
            ("unique".to_string(), unique),
            ("top".to_string(), top),
            ("freq".to_string(), freq),
        ],
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with one delta degree of freedom.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Linear-interpolated quantile of an already sorted slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

// ---------------------------------------------------------------------------
// info()
// ---------------------------------------------------------------------------

/// Render the column-by-column overview: non-null counts, dtypes and an
/// estimated memory footprint, in the familiar dataframe `info()` layout.
pub fn info(table: &DataTable) -> String {
    let mut out = String::new();
    let n = table.len();

    let _ = writeln!(out, "<class 'DataTable'>");
    let index_kind = if table.has_range_index() { "RangeIndex" } else { "Index" };
    match (table.index.first(), table.index.last()) {
        (Some(first), Some(last)) => {
            let _ = writeln!(out, "{index_kind}: {n} entries, {first} to {last}");
        }
        _ => {
            let _ = writeln!(out, "{index_kind}: 0 entries");
        }
    }

    if table.columns.is_empty() {
        let _ = writeln!(out, "Empty DataTable");
        return out;
    }

    let _ = writeln!(out, "Data columns (total {} columns):", table.columns.len());

    let counts: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} non-null", c.non_null_count()))
        .collect();
    let num_w = table.columns.len().to_string().len().max(3);
    let name_w = table
        .columns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Column".len());
    let count_w = counts.iter().map(String::len).max().unwrap_or(0).max("Non-Null Count".len());

    let _ = writeln!(
        out,
        " {:<num_w$} {:<name_w$}  {:<count_w$}  Dtype",
        "#", "Column", "Non-Null Count"
    );
    let _ = writeln!(
        out,
        " {:<num_w$} {:<name_w$}  {:<count_w$}  -----",
        "---", "------", "--------------"
    );
    for (i, (col, count)) in table.columns.iter().zip(&counts).enumerate() {
        let _ = writeln!(out, " {:<num_w$} {:<name_w$}  {:<count_w$}  {}", i, col.name, count, col.dtype);
    }

    let mut dtype_counts: BTreeMap<Dtype, usize> = BTreeMap::new();
    for col in &table.columns {
        *dtype_counts.entry(col.dtype).or_default() += 1;
    }
    let dtypes: Vec<String> = dtype_counts
        .iter()
        .map(|(dtype, count)| format!("{dtype}({count})"))
        .collect();
    let _ = writeln!(out, "dtypes: {}", dtypes.join(", "));

    let has_object = dtype_counts.contains_key(&Dtype::Object);
    let _ = writeln!(out, "memory usage: {}", format_bytes(memory_usage(table), has_object));
    out
}

/// Shallow estimate: 8 bytes per cell (1 for bool) plus the index.
fn memory_usage(table: &DataTable) -> usize {
    let index = if table.has_range_index() { 132 } else { 8 * table.len() };
    let cells: usize = table
        .columns
        .iter()
        .map(|c| match c.dtype {
            Dtype::Bool => c.values.len(),
            _ => 8 * c.values.len(),
        })
        .sum();
    index + cells
}

fn format_bytes(bytes: usize, deep_unknown: bool) -> String {
    let qualifier = if deep_unknown { "+" } else { "" };
    let mut num = bytes as f64;
    for unit in ["bytes", "KB", "MB", "GB"] {
        if num < 1024.0 {
            return format!("{num:.1}{qualifier} {unit}");
        }
        num /= 1024.0;
    }
    format!("{num:.1}{qualifier} TB")
}

// ---------------------------------------------------------------------------
// Histogram + density estimate
// ---------------------------------------------------------------------------

/// Bin counts over `edges` (one more edge than counts) and an optional
/// density curve already scaled to counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub density: Vec<[f64; 2]>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) if !self.counts.is_empty() => {
                (last - first) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram with automatically chosen bins plus a Gaussian KDE overlay.
///
/// Bin width is the smaller of the Freedman–Diaconis and Sturges widths
/// (Sturges alone when the IQR is zero). The KDE uses Scott's bandwidth and is
/// evaluated on `grid_points` points across the data range.
pub fn histogram(values: &[f64], grid_points: usize) -> Histogram {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Histogram { edges: Vec::new(), counts: Vec::new(), density: Vec::new() };
    };

    let (lo, hi, n_bins) = if min == max {
        (min - 0.5, max + 0.5, 1)
    } else {
        (min, max, auto_bin_count(&sorted, max - min))
    };

    let width = (hi - lo) / n_bins as f64;
    let edges: Vec<f64> = (0..=n_bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; n_bins];
    for v in &sorted {
        let bin = (((v - lo) / width) as usize).min(n_bins - 1);
        counts[bin] += 1;
    }

    let density = kde_curve(&sorted, grid_points)
        .into_iter()
        .map(|[x, d]| [x, d * sorted.len() as f64 * width])
        .collect();

    Histogram { edges, counts, density }
}

/// Upper bound on the number of histogram bins.
pub const MAX_BINS: usize = 1000;

/// Bin count from the smaller of the Freedman–Diaconis and Sturges widths.
///
/// A few far outliers can make the FD count explode; past [`MAX_BINS`] the
/// Sturges count is used instead.
fn auto_bin_count(sorted: &[f64], range: f64) -> usize {
    let n = sorted.len() as f64;
    let sturges_width = range / (n.log2() + 1.0);
    let sturges_bins = ((range / sturges_width).ceil() as usize).max(1);

    let iqr = quantile(sorted, 0.75).unwrap_or(0.0) - quantile(sorted, 0.25).unwrap_or(0.0);
    let fd_width = 2.0 * iqr * n.powf(-1.0 / 3.0);
    if fd_width <= 0.0 || fd_width >= sturges_width {
        return sturges_bins.min(MAX_BINS);
    }

    let fd_bins = (range / fd_width).ceil();
    if !fd_bins.is_finite() || fd_bins > MAX_BINS as f64 {
        return sturges_bins.min(MAX_BINS);
    }
    (fd_bins as usize).max(1)
}

/// Gaussian KDE (probability density) on an evenly spaced grid over the data
/// range. Empty when the data has fewer than two distinct values.
pub fn kde_curve(sorted: &[f64], grid_points: usize) -> Vec<[f64; 2]> {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    let Some(sd) = sample_std(sorted) else {
        return Vec::new();
    };
    if min == max || sd == 0.0 || grid_points < 2 {
        return Vec::new();
    }

    let n = sorted.len() as f64;
    let bandwidth = sd * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());
    let step = (max - min) / (grid_points - 1) as f64;

    (0..grid_points)
        .map(|i| {
            let x = min + step * i as f64;
            let sum: f64 = sorted
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            [x, sum * norm]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_csv_bytes;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn stat(summary: &Summary, label: &str, col: usize) -> f64 {
        let (_, values) = summary.rows.iter().find(|(l, _)| l == label).unwrap();
        values[col].as_f64().unwrap_or(f64::NAN)
    }

    #[test]
    fn describe_matches_hand_computed_values() {
        let table = load_csv_bytes(b"Amount,Gender\n1,F\n2,M\n3,F\n4,M\n").unwrap();
        let s = describe(&table);
        assert_eq!(s.columns, vec!["Amount"]);
        assert!(approx(stat(&s, "count", 0), 4.0));
        assert!(approx(stat(&s, "mean", 0), 2.5));
        assert!(approx(stat(&s, "std", 0), (5.0f64 / 3.0).sqrt()));
        assert!(approx(stat(&s, "25%", 0), 1.75));
        assert!(approx(stat(&s, "50%", 0), 2.5));
        assert!(approx(stat(&s, "75%", 0), 3.25));
        assert!(approx(stat(&s, "max", 0), 4.0));
    }

    #[test]
    fn describe_falls_back_to_categories() {
        let table = load_csv_bytes(b"Gender\nF\nM\nF\n").unwrap();
        let s = describe(&table);
        let labels: Vec<&str> = s.rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["count", "unique", "top", "freq"]);
        assert_eq!(s.rows[2].1[0], CellValue::Str("F".into()));
        assert_eq!(s.rows[3].1[0], CellValue::Int(2));
    }

    #[test]
    fn categorical_top_ties_go_to_the_first_value_seen() {
        let table = load_csv_bytes(b"City\nPune\nAgra\nAgra\nPune\n").unwrap();
        let s = describe(&table);
        assert_eq!(s.rows[2].1[0], CellValue::Str("Pune".into()));
        assert_eq!(s.rows[3].1[0], CellValue::Int(2));
    }

    #[test]
    fn numeric_count_is_a_whole_number() {
        let table = load_csv_bytes(b"Amount\n1.5\n2.5\n").unwrap();
        let s = describe(&table);
        assert_eq!(s.rows[0].1[0], CellValue::Int(2));
        assert_eq!(s.rows[0].1[0].to_string(), "2");
    }

    #[test]
    fn describe_empty_numeric_column() {
        let table = load_csv_bytes(b"Amount\n").unwrap();
        let s = describe(&table);
        assert!(approx(stat(&s, "count", 0), 0.0));
        assert!(stat(&s, "mean", 0).is_nan());
    }

    #[test]
    fn info_lists_every_column() {
        let table = load_csv_bytes(b"User_ID,Amount,Gender\n1,10.5,F\n2,,M\n").unwrap();
        let text = info(&table);
        assert!(text.contains("RangeIndex: 2 entries, 0 to 1"));
        assert!(text.contains("Data columns (total 3 columns):"));
        assert!(text.contains("1 non-null"));
        assert!(text.contains("dtypes: float64(1), int64(1), object(1)"));
        assert!(text.contains("+ bytes"));
    }

    #[test]
    fn info_reports_filtered_index() {
        let table = load_csv_bytes(b"a\n1\n2\n3\n").unwrap().take_rows(&[0, 2]);
        assert!(info(&table).contains("Index: 2 entries, 0 to 2"));
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|i| (i % 17) as f64 * 3.0).collect();
        let h = histogram(&values, 200);
        assert_eq!(h.total(), 100);
        assert_eq!(h.edges.len(), h.counts.len() + 1);
        assert!(approx(h.edges[0], 0.0));
        assert!(approx(*h.edges.last().unwrap(), 48.0));
        assert_eq!(h.density.len(), 200);
    }

    #[test]
    fn histogram_uses_sturges_when_iqr_is_zero() {
        // 8 values: log2(8) + 1 = 4 bins
        let h = histogram(&[0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 4.0], 50);
        assert_eq!(h.counts.len(), 4);
        assert_eq!(h.counts, vec![1, 6, 0, 1]);
    }

    #[test]
    fn one_far_outlier_does_not_explode_the_bin_count() {
        let mut values: Vec<f64> = (0..1000).map(f64::from).collect();
        values.push(1e14);
        let h = histogram(&values, 10);
        assert!(h.counts.len() <= MAX_BINS, "{} bins", h.counts.len());
        // Sturges: ceil(log2(1001) + 1) = 11
        assert_eq!(h.counts.len(), 11);
        assert_eq!(h.total(), 1001);
        assert_eq!(h.counts[0], 1000);
        assert_eq!(*h.counts.last().unwrap(), 1);
    }

    #[test]
    fn constant_values_get_one_unit_bin_and_no_curve() {
        let h = histogram(&[7.0, 7.0, 7.0], 200);
        assert_eq!(h.edges, vec![6.5, 7.5]);
        assert_eq!(h.counts, vec![3]);
        assert!(h.density.is_empty());
    }

    #[test]
    fn density_integrates_to_roughly_the_count() {
        let values: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64).collect();
        let h = histogram(&values, 400);
        let step = h.density[1][0] - h.density[0][0];
        let area: f64 = h.density.iter().map(|[_, d]| d * step).sum::<f64>() / h.bin_width();
        // cut at the data range, so a little mass falls outside
        assert!(area > 400.0 && area < 500.0, "area = {area}");
    }

    #[test]
    fn empty_input_gives_empty_histogram() {
        let h = histogram(&[], 200);
        assert!(h.counts.is_empty());
        assert_eq!(h.bin_width(), 0.0);
    }
}
