use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::report::{page_header, Panel, TableView};
use crate::settings::ReportSettings;
use crate::state::AppState;

use super::plot;

// ---------------------------------------------------------------------------
// Central panel – the report page
// ---------------------------------------------------------------------------

/// Draw the last rendered report, or the page header plus the error that
/// aborted the pass.
pub fn report_page(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match &state.rendered {
            Ok(report) => {
                for (i, panel) in report.panels.iter().enumerate() {
                    ui.push_id(i, |ui: &mut Ui| draw_panel(ui, panel));
                }
            }
            Err(e) => {
                for panel in page_header(&ReportSettings::default()) {
                    draw_panel(ui, &panel);
                }
                ui.add_space(8.0);
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
                });
            }
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(title).size(18.0).strong());
}

fn draw_panel(ui: &mut Ui, panel: &Panel) {
    match panel {
        Panel::Title(text) => {
            ui.label(RichText::new(text).size(30.0).strong());
        }
        Panel::Markdown(text) => {
            ui.label(text);
        }
        Panel::Subheader(text) => {
            ui.add_space(12.0);
            ui.heading(text);
            ui.separator();
        }
        Panel::Text(text) => {
            ui.label(text);
        }
        Panel::Warning(text) => {
            ui.add_space(8.0);
            let color = ui.visuals().warn_fg_color;
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(text).color(color));
            });
        }
        Panel::Shape { rows, columns } => {
            section(ui, "Dataset Shape");
            ui.monospace(format!("({rows}, {columns})"));
        }
        Panel::Head(view) => {
            section(ui, "First Five Rows of Data");
            data_table(ui, view);
        }
        Panel::Info(text) => {
            section(ui, "Dataset Information");
            ui.label(RichText::new(text).monospace());
        }
        Panel::Summary(view) => {
            section(ui, "Summary Statistics");
            data_table(ui, view);
        }
        Panel::Distribution(dist) => {
            section(ui, "Distribution of Sales Amount");
            match &dist.histogram {
                Some(histogram) => plot::distribution_plot(ui, &dist.column, histogram),
                None => {
                    ui.label(
                        RichText::new(format!("No `{}` column to plot.", dist.column)).weak(),
                    );
                }
            }
        }
        Panel::Placeholder(text) => {
            section(ui, "Additional Visualizations (Coming Soon)");
            let color = ui.visuals().hyperlink_color;
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(text).color(color));
            });
        }
    }
}

/// Index column followed by one column per field, scrollable sideways.
fn data_table(ui: &mut Ui, view: &TableView) {
    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(30.0))
            .columns(Column::auto().at_least(60.0), view.columns.len())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.label("");
                });
                for name in &view.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for (label, row) in view.index.iter().zip(&view.rows) {
                    body.row(18.0, |mut table_row| {
                        table_row.col(|ui: &mut Ui| {
                            ui.label(RichText::new(label).weak());
                        });
                        for cell in row {
                            table_row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}
