use crate::{
    LayoutParameters, LayoutPlan, PlacedContent, PlacedElement, TextMetrics, TextRole,
};
use etiqueta_types::{LabelCanvas, LabelRecord};

/// Fixed clearance between the SKU baseline cursor and the top of the
/// barcode box.
const BARCODE_CLEARANCE_MM: f32 = 2.0;

/// The code-text baseline sits this far above the bottom margin.
const CODE_TEXT_RISE_MM: f32 = 1.5;

/// Computes the geometric placement of a label's elements.
///
/// The engine is deterministic, pure and infallible: it always returns
/// a complete plan. Visual overflow beyond the label edges is a
/// parameter-tuning concern for the operator, not a runtime failure, so
/// nothing here errors or truncates.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Lays out one record inside the canvas.
    ///
    /// Vertical cascade: the title baseline starts at the top margin,
    /// the SKU follows after the title line spacing plus the title/SKU
    /// gap, and the barcode box opens a fixed 2 mm below the cursor.
    /// The code-text baseline is anchored to the bottom margin instead
    /// of the cascade: if the stack above grows too tall only its top
    /// overflows, the digits are never pushed off-label.
    ///
    /// Empty title or SKU strings still consume their line height, so
    /// vertical alignment stays predictable across records.
    pub fn compute_plan(
        &self,
        record: &LabelRecord,
        params: &LayoutParameters,
        canvas: LabelCanvas,
        metrics: &dyn TextMetrics,
    ) -> LayoutPlan {
        let center_x = canvas.width_mm / 2.0;
        let usable_w = params.usable_width_mm(canvas.width_mm);
        let mut elements = Vec::with_capacity(4);

        let mut baseline = params.margin_top_mm;
        elements.push(text_element(
            TextRole::Title,
            &record.title,
            params.title_font_size_pt,
            center_x,
            baseline,
            metrics,
        ));

        baseline += params.title_line_spacing_mm + params.title_sku_gap_mm;
        elements.push(text_element(
            TextRole::Sku,
            &record.sku,
            params.sku_font_size_pt,
            center_x,
            baseline,
            metrics,
        ));

        baseline += params.sku_barcode_gap_mm;
        let barcode_top = baseline + BARCODE_CLEARANCE_MM;
        // Width is clamped to the usable span; height deliberately is
        // not, matching the non-truncation policy for text.
        let barcode_width = params.barcode_width_mm.min(usable_w);
        if params.barcode_width_mm > usable_w {
            log::debug!(
                "barcode width {:.2} mm clamped to usable {:.2} mm",
                params.barcode_width_mm,
                usable_w
            );
        }
        elements.push(PlacedElement {
            content: PlacedContent::Barcode {
                digits: record.barcode_digits.clone(),
            },
            center_x_mm: center_x,
            y_mm: barcode_top,
            width_mm: barcode_width,
            height_mm: params.barcode_height_mm,
        });

        let code_baseline = canvas.height_mm - params.margin_bottom_mm - CODE_TEXT_RISE_MM;
        elements.push(text_element(
            TextRole::CodeText,
            &record.barcode_digits,
            params.code_font_size_pt,
            center_x,
            code_baseline,
            metrics,
        ));

        LayoutPlan { canvas, elements }
    }
}

fn text_element(
    role: TextRole,
    text: &str,
    font_size_pt: f32,
    center_x_mm: f32,
    baseline_mm: f32,
    metrics: &dyn TextMetrics,
) -> PlacedElement {
    PlacedElement {
        content: PlacedContent::Text {
            role,
            text: text.to_string(),
            font_size_pt,
        },
        center_x_mm,
        y_mm: baseline_mm,
        width_mm: metrics.measure_width_mm(text, font_size_pt),
        height_mm: metrics.ascent_mm(font_size_pt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etiqueta_types::units::pt_to_mm;

    /// Deterministic stand-in for a backend measurement function:
    /// every glyph advances half an em, ascent is 0.8 em.
    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn measure_width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
            text.chars().count() as f32 * pt_to_mm(font_size_pt) * 0.5
        }

        fn ascent_mm(&self, font_size_pt: f32) -> f32 {
            pt_to_mm(font_size_pt) * 0.8
        }
    }

    fn plan_for(record: &LabelRecord, params: &LayoutParameters) -> LayoutPlan {
        LayoutEngine::new().compute_plan(record, params, LabelCanvas::default(), &FixedMetrics)
    }

    fn sample_record() -> LabelRecord {
        LabelRecord::new("WIDGET PRO", "SKU-001", "012345678905")
    }

    #[test]
    fn default_parameter_scenario() {
        let plan = plan_for(&sample_record(), &LayoutParameters::default());

        let title = plan.text(TextRole::Title).unwrap();
        assert_eq!(title.y_mm, 3.5);
        assert_eq!(title.center_x_mm, 25.5);

        // 3.5 + line spacing 3.4 + title/sku gap 0.8
        let sku = plan.text(TextRole::Sku).unwrap();
        assert!((sku.y_mm - 7.7).abs() < 1e-5);

        // sku gap 0.0 + 2 mm clearance
        let barcode = plan.barcode().unwrap();
        assert!((barcode.y_mm - 9.7).abs() < 1e-5);
        // 45.5 mm requested, clamped to 51 - 3 - 3 = 45 mm usable
        assert!((barcode.width_mm - 45.0).abs() < 1e-5);
        assert_eq!(barcode.height_mm, 10.0);

        // 25 - bottom margin 1.0 - 1.5
        let code = plan.text(TextRole::CodeText).unwrap();
        assert!((code.y_mm - 22.5).abs() < 1e-5);
    }

    #[test]
    fn plan_is_deterministic() {
        let record = sample_record();
        let params = LayoutParameters::default();
        assert_eq!(plan_for(&record, &params), plan_for(&record, &params));
    }

    #[test]
    fn barcode_width_never_exceeds_usable_width() {
        let record = sample_record();
        for requested in [10.0, 45.0, 45.5, 60.0, 1000.0] {
            let params = LayoutParameters {
                barcode_width_mm: requested,
                ..LayoutParameters::default()
            };
            let plan = plan_for(&record, &params);
            let barcode = plan.barcode().unwrap();
            assert!(barcode.width_mm <= 45.0 + 1e-5, "requested {requested}");
        }
    }

    #[test]
    fn barcode_height_is_never_clamped() {
        let params = LayoutParameters {
            barcode_height_mm: 40.0, // taller than the whole label
            ..LayoutParameters::default()
        };
        let plan = plan_for(&sample_record(), &params);
        assert_eq!(plan.barcode().unwrap().height_mm, 40.0);
    }

    #[test]
    fn code_text_baseline_is_bottom_anchored() {
        let record = sample_record();
        let base = plan_for(&record, &LayoutParameters::default());
        let base_y = base.text(TextRole::CodeText).unwrap().y_mm;

        // Invariant to everything that feeds the top-down cascade.
        let variations = [
            LayoutParameters {
                title_font_size_pt: 14.0,
                ..LayoutParameters::default()
            },
            LayoutParameters {
                sku_font_size_pt: 12.0,
                ..LayoutParameters::default()
            },
            LayoutParameters {
                title_line_spacing_mm: 6.0,
                ..LayoutParameters::default()
            },
            LayoutParameters {
                title_sku_gap_mm: 4.0,
                sku_barcode_gap_mm: 5.0,
                ..LayoutParameters::default()
            },
        ];
        for params in variations {
            let plan = plan_for(&record, &params);
            assert_eq!(plan.text(TextRole::CodeText).unwrap().y_mm, base_y);
        }

        // Only the bottom margin moves it.
        let params = LayoutParameters {
            margin_bottom_mm: 2.0,
            ..LayoutParameters::default()
        };
        let plan = plan_for(&record, &params);
        assert!((plan.text(TextRole::CodeText).unwrap().y_mm - 21.5).abs() < 1e-5);
    }

    #[test]
    fn empty_title_still_consumes_its_line() {
        let params = LayoutParameters::default();
        let with_title = plan_for(&sample_record(), &params);
        let without_title = plan_for(&LabelRecord::new("", "SKU-001", "012345678905"), &params);

        let sku_y = |plan: &LayoutPlan| plan.text(TextRole::Sku).unwrap().y_mm;
        assert_eq!(sku_y(&with_title), sku_y(&without_title));

        let empty_title = without_title.text(TextRole::Title).unwrap();
        assert_eq!(empty_title.width_mm, 0.0);
        assert_eq!(empty_title.y_mm, 3.5);
    }

    #[test]
    fn elements_are_in_paint_order() {
        let plan = plan_for(&sample_record(), &LayoutParameters::default());
        assert_eq!(plan.elements.len(), 4);
        assert!(matches!(
            plan.elements[0].content,
            PlacedContent::Text { role: TextRole::Title, .. }
        ));
        assert!(matches!(
            plan.elements[1].content,
            PlacedContent::Text { role: TextRole::Sku, .. }
        ));
        assert!(matches!(plan.elements[2].content, PlacedContent::Barcode { .. }));
        assert!(matches!(
            plan.elements[3].content,
            PlacedContent::Text { role: TextRole::CodeText, .. }
        ));
    }
}
