use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Histogram colours
// ---------------------------------------------------------------------------

/// Hue shared by the histogram bars and the density curve.
const HISTOGRAM_HUE: f32 = 210.0;

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Colours used by the distribution plot.
#[derive(Debug, Clone, Copy)]
pub struct HistogramColors {
    pub bar_fill: Color32,
    pub bar_stroke: Color32,
    pub density: Color32,
}

impl Default for HistogramColors {
    fn default() -> Self {
        let base = hsl_to_color32(HISTOGRAM_HUE, 0.55, 0.55);
        Self {
            bar_fill: base.gamma_multiply(0.6),
            bar_stroke: hsl_to_color32(HISTOGRAM_HUE, 0.55, 0.35),
            density: hsl_to_color32(HISTOGRAM_HUE, 0.75, 0.30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_is_darker_than_bars() {
        let colors = HistogramColors::default();
        let lum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(lum(colors.density) < lum(hsl_to_color32(HISTOGRAM_HUE, 0.55, 0.55)));
        assert!(colors.bar_fill.a() < 255);
    }

    #[test]
    fn blue_hue_is_blue_dominant() {
        let c = hsl_to_color32(HISTOGRAM_HUE, 0.55, 0.55);
        assert!(c.b() > c.r());
    }
}
