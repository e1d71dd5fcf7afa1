// ---------------------------------------------------------------------------
// Fixed report settings
// ---------------------------------------------------------------------------

/// Constants that shape the report. There is no config file or CLI; the app
/// always renders with [`ReportSettings::default`].
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub title: String,
    pub intro: String,
    /// Columns removed during cleaning when present.
    pub dropped_columns: Vec<String>,
    /// Column coerced to integer and plotted.
    pub amount_column: String,
    /// Rows shown by the head panel.
    pub head_rows: usize,
    /// Points on which the density curve is evaluated.
    pub kde_grid_points: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "🪔 Diwali Sales Data Analysis 🪔".to_string(),
            intro: "Welcome to the Diwali Sales Data Analysis App! \
                    Upload your dataset to explore sales trends, customer insights, and more. \
                    Use the sidebar to navigate through different analysis sections."
                .to_string(),
            dropped_columns: vec!["Status".to_string(), "unnamed1".to_string()],
            amount_column: "Amount".to_string(),
            head_rows: 5,
            kde_grid_points: 200,
        }
    }
}
