use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::HistogramColors;
use crate::data::stats::Histogram;

// ---------------------------------------------------------------------------
// Amount distribution plot
// ---------------------------------------------------------------------------

/// Draw the histogram bars with the density curve on top.
pub fn distribution_plot(ui: &mut Ui, column: &str, histogram: &Histogram) {
    let colors = HistogramColors::default();

    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .zip(histogram.edges.windows(2))
        .map(|(&count, edge)| {
            Bar::new((edge[0] + edge[1]) / 2.0, count as f64)
                .width(edge[1] - edge[0])
                .fill(colors.bar_fill)
                .stroke(Stroke::new(1.0, colors.bar_stroke))
        })
        .collect();

    Plot::new("amount_distribution")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label(column)
        .y_axis_label("Count")
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("count"));

            if !histogram.density.is_empty() {
                let points: PlotPoints = histogram.density.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name("density")
                        .color(colors.density)
                        .width(2.0),
                );
            }
        });
}
