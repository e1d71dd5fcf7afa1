use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – upload + toggles
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.separator();

    ui.label("Upload your Diwali Sales CSV file");
    if ui.button("Browse files…").clicked() {
        open_file_dialog(state);
    }

    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).color(Color32::RED));
    }

    let Some(upload) = &state.upload else {
        return;
    };
    ui.label(RichText::new(&upload.name).monospace());
    if state.upload_parsed() {
        ui.label(RichText::new("File uploaded successfully!").color(Color32::DARK_GREEN));
    }
    ui.add_space(8.0);

    let before = state.toggles;
    let toggles = &mut state.toggles;

    ui.strong("Data Exploration Options");
    ui.checkbox(&mut toggles.shape, "Show Data Shape");
    ui.checkbox(&mut toggles.head, "Show First 5 Rows");
    ui.checkbox(&mut toggles.info, "Show Dataset Info");
    ui.checkbox(&mut toggles.summary, "Show Summary Statistics");
    ui.add_space(8.0);

    ui.strong("Visualization Options");
    ui.checkbox(&mut toggles.amount_distribution, "Show Amount Distribution");

    if state.toggles != before {
        log::debug!("Toggles changed: {:?}", state.toggles);
        state.rerender();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.upload.is_some(), egui::Button::new("Close"))
                .clicked()
            {
                state.clear_upload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(upload) = &state.upload {
            ui.label(format!("{} ({} bytes)", upload.name, upload.bytes.len()));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload sales data")
        .add_filter("CSV", &["csv"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        match read_upload(&path) {
            Ok((name, bytes)) => state.set_upload(name, bytes),
            Err(e) => {
                log::error!("Failed to read file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn read_upload(path: &std::path::Path) -> Result<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, bytes))
}
