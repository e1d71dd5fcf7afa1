//! The report renderer: uploaded bytes + toggles in, ordered panels out.
//!
//! ```text
//!  bytes ──► loader ──► UploadedDataset ──► exploration panels
//!                             │
//!                             ▼
//!                        clean_dataset ──► CleanedDataset ──► summary / histogram
//! ```
//!
//! Nothing survives between calls; the UI calls [`render`] again whenever the
//! upload or a toggle changes.

use crate::data::clean::clean_dataset;
use crate::data::loader::load_csv_bytes;
use crate::data::model::{CellValue, DataTable};
use crate::data::stats::{self, Histogram, Summary};
use crate::error::ReportError;
use crate::settings::ReportSettings;

// ---------------------------------------------------------------------------
// Toggles
// ---------------------------------------------------------------------------

/// Side-panel checkboxes. Each one gates exactly one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    pub shape: bool,
    pub head: bool,
    pub info: bool,
    pub summary: bool,
    pub amount_distribution: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            shape: true,
            head: true,
            info: false,
            summary: true,
            amount_distribution: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// A rectangular grid of already formatted cells with row labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    fn from_table(table: &DataTable) -> Self {
        TableView {
            columns: table.column_names().into_iter().map(str::to_string).collect(),
            index: table.index.iter().map(|i| i.to_string()).collect(),
            rows: (0..table.len())
                .map(|pos| table.row(pos).map(CellValue::to_string).collect())
                .collect(),
        }
    }

    fn from_summary(summary: &Summary) -> Self {
        TableView {
            columns: summary.columns.clone(),
            index: summary.rows.iter().map(|(label, _)| label.clone()).collect(),
            rows: summary
                .rows
                .iter()
                .map(|(_, values)| values.iter().map(CellValue::to_string).collect())
                .collect(),
        }
    }
}

/// Histogram panel content. `histogram` is `None` when the column is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub column: String,
    pub histogram: Option<Histogram>,
}

/// One discrete unit of output, drawn top-to-bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Title(String),
    Markdown(String),
    Subheader(String),
    Text(String),
    Warning(String),
    Shape { rows: usize, columns: usize },
    Head(TableView),
    Info(String),
    Summary(TableView),
    Distribution(Distribution),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub panels: Vec<Panel>,
}

/// Panels shown on every page, before anything else and even on error.
pub fn page_header(settings: &ReportSettings) -> Vec<Panel> {
    vec![
        Panel::Title(settings.title.clone()),
        Panel::Markdown(settings.intro.clone()),
    ]
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the report with the built-in settings.
pub fn render(upload: Option<&[u8]>, toggles: &DisplayToggles) -> Result<Report, ReportError> {
    render_with(upload, toggles, &ReportSettings::default())
}

/// Render the full report. Any parse or coercion error aborts the pass.
pub fn render_with(
    upload: Option<&[u8]>,
    toggles: &DisplayToggles,
    settings: &ReportSettings,
) -> Result<Report, ReportError> {
    let mut panels = page_header(settings);

    let Some(bytes) = upload else {
        panels.push(Panel::Warning(
            "Please upload a CSV file to begin analysis.".to_string(),
        ));
        return Ok(Report { panels });
    };

    let uploaded = load_csv_bytes(bytes)?;
    log::info!(
        "Parsed upload: {} rows x {} columns",
        uploaded.len(),
        uploaded.columns.len()
    );

    // ---- Exploration ----
    panels.push(Panel::Subheader("📊 Data Exploration".to_string()));
    if toggles.shape {
        let (rows, columns) = uploaded.shape();
        panels.push(Panel::Shape { rows, columns });
    }
    if toggles.head {
        let n = settings.head_rows.min(uploaded.len());
        let positions: Vec<usize> = (0..n).collect();
        panels.push(Panel::Head(TableView::from_table(&uploaded.take_rows(&positions))));
    }
    if toggles.info {
        panels.push(Panel::Info(stats::info(&uploaded)));
    }

    // ---- Cleaning ----
    panels.push(Panel::Subheader("🧹 Data Cleaning".to_string()));
    panels.push(Panel::Text(
        "Dropping irrelevant columns and handling missing values.".to_string(),
    ));
    let cleaned = clean_dataset(&uploaded, settings)?;
    if cleaned.amount_converted {
        panels.push(Panel::Text(format!(
            "Converted `{}` column to integer.",
            settings.amount_column
        )));
    }
    log::info!(
        "Cleaned dataset: {} rows x {} columns",
        cleaned.table.len(),
        cleaned.table.columns.len()
    );

    if toggles.summary {
        panels.push(Panel::Summary(TableView::from_summary(&stats::describe(
            &cleaned.table,
        ))));
    }

    // ---- Visualization ----
    panels.push(Panel::Subheader("📈 Visualizations".to_string()));
    if toggles.amount_distribution {
        let histogram = cleaned
            .table
            .column(&settings.amount_column)
            .map(|col| stats::histogram(&col.numeric_values(), settings.kde_grid_points));
        match &histogram {
            Some(h) => log::debug!("Histogram of {} values in {} bins", h.total(), h.counts.len()),
            None => log::debug!("No `{}` column, distribution panel left empty", settings.amount_column),
        }
        panels.push(Panel::Distribution(Distribution {
            column: settings.amount_column.clone(),
            histogram,
        }));
    }

    panels.push(Panel::Placeholder(
        "Select visualization options from the sidebar.".to_string(),
    ));

    Ok(Report { panels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dtype;
    use crate::settings::ReportSettings;

    const SALES: &[u8] = b"User_ID,Cust_name,Gender,Age,Status,unnamed1,Amount\n\
1000001,Sanskriti,F,28,,,23952.0\n\
1000002,Kartik,M,35,,,23934.0\n\
1000003,Bindu,F,35,,,\n\
1000004,Sudevi,M,16,,,23912.0\n\
1000005,Joni,F,28,,,23877.0\n\
1000006,Priya,F,42,,,23841.0\n";

    fn body(report: &Report) -> &[Panel] {
        &report.panels[2..]
    }

    #[test]
    fn no_upload_renders_only_the_warning() {
        let report = render(None, &DisplayToggles::default()).unwrap();
        assert_eq!(
            body(&report),
            &[Panel::Warning("Please upload a CSV file to begin analysis.".to_string())]
        );
        assert!(matches!(report.panels[0], Panel::Title(_)));
    }

    #[test]
    fn default_toggles_produce_the_full_page() {
        let report = render(Some(SALES), &DisplayToggles::default()).unwrap();
        let kinds: Vec<&str> = body(&report)
            .iter()
            .map(|p| match p {
                Panel::Subheader(_) => "subheader",
                Panel::Text(_) => "text",
                Panel::Shape { .. } => "shape",
                Panel::Head(_) => "head",
                Panel::Info(_) => "info",
                Panel::Summary(_) => "summary",
                Panel::Distribution(_) => "distribution",
                Panel::Placeholder(_) => "placeholder",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "subheader",
                "shape",
                "head",
                "subheader",
                "text",
                "text",
                "summary",
                "subheader",
                "distribution",
                "placeholder"
            ]
        );
    }

    #[test]
    fn exploration_describes_the_upload_summary_describes_the_cleaned_data() {
        let report = render(Some(SALES), &DisplayToggles::default()).unwrap();
        let shape = body(&report).iter().find_map(|p| match p {
            Panel::Shape { rows, columns } => Some((*rows, *columns)),
            _ => None,
        });
        assert_eq!(shape, Some((6, 7)));

        let head = body(&report).iter().find_map(|p| match p {
            Panel::Head(t) => Some(t),
            _ => None,
        });
        let head = head.unwrap();
        assert_eq!(head.rows.len(), 5);
        assert_eq!(head.index, vec!["0", "1", "2", "3", "4"]);
        assert_eq!(head.rows[0][6], "23952.0");

        // Status and unnamed1 are entirely empty, so dropping them first keeps
        // every row except the one missing Amount.
        let summary = body(&report).iter().find_map(|p| match p {
            Panel::Summary(t) => Some(t),
            _ => None,
        });
        let summary = summary.unwrap();
        assert_eq!(summary.columns, vec!["User_ID", "Age", "Amount"]);
        assert_eq!(summary.rows[0], vec!["5", "5", "5"]);
    }

    #[test]
    fn turning_shape_off_removes_exactly_the_shape_panel() {
        let on = render(Some(SALES), &DisplayToggles::default()).unwrap();
        let toggles = DisplayToggles { shape: false, ..Default::default() };
        let off = render(Some(SALES), &toggles).unwrap();

        let expected: Vec<Panel> = on
            .panels
            .into_iter()
            .filter(|p| !matches!(p, Panel::Shape { .. }))
            .collect();
        assert_eq!(off.panels, expected);
    }

    #[test]
    fn info_toggle_adds_the_info_panel() {
        let toggles = DisplayToggles { info: true, ..Default::default() };
        let report = render(Some(SALES), &toggles).unwrap();
        let info = body(&report).iter().find_map(|p| match p {
            Panel::Info(text) => Some(text.as_str()),
            _ => None,
        });
        let info = info.unwrap();
        assert!(info.contains("RangeIndex: 6 entries, 0 to 5"));
        assert!(info.contains("Amount"));
    }

    #[test]
    fn all_toggles_off_keeps_the_fixed_panels() {
        let toggles = DisplayToggles {
            shape: false,
            head: false,
            info: false,
            summary: false,
            amount_distribution: false,
        };
        let report = render(Some(SALES), &toggles).unwrap();
        assert_eq!(
            body(&report),
            &[
                Panel::Subheader("📊 Data Exploration".to_string()),
                Panel::Subheader("🧹 Data Cleaning".to_string()),
                Panel::Text("Dropping irrelevant columns and handling missing values.".to_string()),
                Panel::Text("Converted `Amount` column to integer.".to_string()),
                Panel::Subheader("📈 Visualizations".to_string()),
                Panel::Placeholder("Select visualization options from the sidebar.".to_string()),
            ]
        );
    }

    #[test]
    fn dropped_column_nan_does_not_drop_the_row() {
        let csv = b"Amount,Status,unnamed1,Gender\n100.0,Booked,NaN,F\n250.0,Booked,1,M\n";
        let uploaded = load_csv_bytes(csv).unwrap();
        let cleaned = clean_dataset(&uploaded, &ReportSettings::default()).unwrap();

        assert_eq!(cleaned.table.column_names(), vec!["Amount", "Gender"]);
        assert_eq!(cleaned.table.len(), 2);
        let amount = cleaned.table.column("Amount").unwrap();
        assert_eq!(amount.dtype, Dtype::Int64);
        assert_eq!(amount.values, vec![CellValue::Int(100), CellValue::Int(250)]);

        let report = render(Some(&csv[..]), &DisplayToggles::default()).unwrap();
        let dist = body(&report).iter().find_map(|p| match p {
            Panel::Distribution(d) => Some(d),
            _ => None,
        });
        assert_eq!(dist.unwrap().histogram.as_ref().unwrap().total(), 2);
    }

    #[test]
    fn missing_amount_gives_an_empty_distribution_panel() {
        let report = render(Some(&b"Gender,Age\nF,20\nM,31\n"[..]), &DisplayToggles::default()).unwrap();
        let dist = body(&report).iter().find_map(|p| match p {
            Panel::Distribution(d) => Some(d),
            _ => None,
        });
        assert_eq!(dist.unwrap().histogram, None);
        assert!(!body(&report)
            .iter()
            .any(|p| matches!(p, Panel::Text(t) if t.starts_with("Converted"))));
    }

    #[test]
    fn non_integer_amount_aborts_the_pass() {
        let err = render(Some(&b"Amount\n10\nlots\n"[..]), &DisplayToggles::default()).unwrap_err();
        assert!(matches!(err, ReportError::Coercion { row: 1, .. }));
    }

    #[test]
    fn malformed_csv_aborts_the_pass() {
        let err = render(Some(&b"a,b\n1,2,3\n"[..]), &DisplayToggles::default()).unwrap_err();
        assert!(matches!(err, ReportError::TooManyFields { line: 2, .. }));
        assert!(!err.after_parse());
    }

    #[test]
    fn short_row_is_padded_then_dropped_by_cleaning() {
        let csv = b"Amount,Gender\n100,F\n250\n300,M\n";
        let report = render(Some(&csv[..]), &DisplayToggles::default()).unwrap();

        let shape = body(&report).iter().find_map(|p| match p {
            Panel::Shape { rows, columns } => Some((*rows, *columns)),
            _ => None,
        });
        assert_eq!(shape, Some((3, 2)));

        let summary = body(&report).iter().find_map(|p| match p {
            Panel::Summary(t) => Some(t),
            _ => None,
        });
        assert_eq!(summary.unwrap().rows[0], vec!["2"]);

        let dist = body(&report).iter().find_map(|p| match p {
            Panel::Distribution(d) => Some(d),
            _ => None,
        });
        assert_eq!(dist.unwrap().histogram.as_ref().unwrap().total(), 2);
    }
}
