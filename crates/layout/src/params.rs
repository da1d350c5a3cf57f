use serde::{Deserialize, Serialize};

/// User-adjustable size and spacing parameters for one label.
///
/// Owned by the caller and passed by value into each render call; the
/// engine never retains or mutates a snapshot. Defaults mirror the
/// values the tool ships with for 51×25 mm stock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParameters {
    pub title_font_size_pt: f32,
    pub sku_font_size_pt: f32,
    pub code_font_size_pt: f32,

    pub barcode_height_mm: f32,
    pub barcode_width_mm: f32,

    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,

    /// Distance from the title baseline to the next baseline.
    pub title_line_spacing_mm: f32,
    /// Extra vertical space between the title and the SKU.
    pub title_sku_gap_mm: f32,
    /// Extra vertical space after the SKU, before the barcode block.
    pub sku_barcode_gap_mm: f32,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            title_font_size_pt: 8.5,
            sku_font_size_pt: 8.0,
            code_font_size_pt: 9.0,
            barcode_height_mm: 10.0,
            barcode_width_mm: 45.5,
            margin_left_mm: 3.0,
            margin_right_mm: 3.0,
            margin_top_mm: 3.5,
            margin_bottom_mm: 1.0,
            title_line_spacing_mm: 3.4,
            title_sku_gap_mm: 0.8,
            sku_barcode_gap_mm: 0.0,
        }
    }
}

impl LayoutParameters {
    /// Width left between the horizontal margins, never negative.
    pub fn usable_width_mm(&self, canvas_width_mm: f32) -> f32 {
        (canvas_width_mm - self.margin_left_mm - self.margin_right_mm).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_usable_width() {
        let params = LayoutParameters::default();
        assert!((params.usable_width_mm(51.0) - 45.0).abs() < 1e-5);
    }

    #[test]
    fn usable_width_never_goes_negative() {
        let params = LayoutParameters {
            margin_left_mm: 30.0,
            margin_right_mm: 30.0,
            ..LayoutParameters::default()
        };
        assert_eq!(params.usable_width_mm(51.0), 0.0);
    }

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let json = r#"{ "title_font_size_pt": 10.0, "margin_bottom_mm": 2.0 }"#;
        let params: LayoutParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.title_font_size_pt, 10.0);
        assert_eq!(params.margin_bottom_mm, 2.0);
        // Untouched fields fall back to the shipped defaults.
        assert_eq!(params.sku_font_size_pt, 8.0);
        assert_eq!(params.barcode_width_mm, 45.5);
    }
}
