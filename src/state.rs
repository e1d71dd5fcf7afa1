use crate::error::ReportError;
use crate::report::{render, DisplayToggles, Report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Raw bytes of the file picked in the side panel.
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The full UI state, independent of rendering.
///
/// Only the upload and the toggles are kept between interactions; the report
/// is recomputed from them on every change.
pub struct AppState {
    /// Uploaded file (None until the user picks one).
    pub upload: Option<Upload>,

    /// Side-panel checkboxes.
    pub toggles: DisplayToggles,

    /// Outcome of the last render pass.
    pub rendered: Result<Report, ReportError>,

    /// Status / error message from the file picker.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let toggles = DisplayToggles::default();
        Self {
            upload: None,
            rendered: render(None, &toggles),
            toggles,
            status_message: None,
        }
    }
}

impl AppState {
    /// Replace the upload and render the report for it.
    pub fn set_upload(&mut self, name: String, bytes: Vec<u8>) {
        log::info!("Uploaded {name} ({} bytes)", bytes.len());
        self.upload = Some(Upload { name, bytes });
        self.status_message = None;
        self.rerender();
    }

    /// Forget the upload; the report falls back to the upload prompt.
    pub fn clear_upload(&mut self) {
        self.upload = None;
        self.rerender();
    }

    /// Run a fresh render pass from the upload and the current toggles.
    pub fn rerender(&mut self) {
        let bytes = self.upload.as_ref().map(|u| u.bytes.as_slice());
        self.rendered = render(bytes, &self.toggles);
        if let Err(e) = &self.rendered {
            log::warn!("Render aborted: {e}");
        }
    }

    /// Whether the current upload was read as a CSV table. A later failure
    /// in the pass (such as a bad `Amount` cell) still counts as parsed.
    pub fn upload_parsed(&self) -> bool {
        self.upload.is_some()
            && match &self.rendered {
                Ok(_) => true,
                Err(e) => e.after_parse(),
            }
    }
}
