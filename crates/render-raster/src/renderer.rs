use etiqueta_layout::{LayoutPlan, PlacedContent, PlacedElement};
use etiqueta_render_core::FontResource;
use etiqueta_types::units::{PREVIEW_SCALE, mm_to_px, pt_to_mm};
use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME: Rgb<u8> = Rgb([51, 65, 85]);
const PLACEHOLDER: Rgb<u8> = Rgb([170, 170, 170]);

/// Paints layout plans into preview bitmaps.
///
/// Best-effort by design: without a usable font file, text extents are
/// painted as flat boxes (from the plan's measured geometry) so the
/// operator can still judge placement.
pub struct PreviewRenderer {
    font: Option<Font<'static>>,
    scale: f32,
}

impl PreviewRenderer {
    pub fn new(font: &FontResource) -> Self {
        let font = font
            .data()
            .and_then(|data| Font::try_from_vec(data.as_ref().clone()));
        if font.is_none() {
            log::debug!("preview renders text as placeholder boxes (no font file)");
        }
        Self {
            font,
            scale: PREVIEW_SCALE,
        }
    }

    /// Overrides the pixels-per-millimeter scale (the preview surface
    /// uses the fixed default).
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Renders one label to an RGB bitmap.
    pub fn render(&self, plan: &LayoutPlan) -> RgbImage {
        let width = mm_to_px(plan.canvas.width_mm, self.scale);
        let height = mm_to_px(plan.canvas.height_mm, self.scale);
        let mut img = RgbImage::from_pixel(width, height, WHITE);

        for el in &plan.elements {
            match &el.content {
                PlacedContent::Text { text, font_size_pt, .. } => {
                    self.draw_text(&mut img, el, text, *font_size_pt);
                }
                PlacedContent::Barcode { digits } => {
                    self.draw_barcode(&mut img, el, digits);
                }
            }
        }

        draw_frame(&mut img);
        img
    }

    /// Draws a single line centered at the element's center, with the
    /// baseline anchored at `top + ascent`.
    fn draw_text(&self, img: &mut RgbImage, el: &PlacedElement, text: &str, font_size_pt: f32) {
        if text.is_empty() {
            return;
        }
        let center_x = mm_to_px(el.center_x_mm, self.scale) as f32;
        let baseline_y = mm_to_px(el.y_mm, self.scale) as f32;

        let Some(font) = &self.font else {
            // Placeholder box over the measured extent.
            let w = mm_to_px(el.width_mm, self.scale);
            let h = mm_to_px(el.height_mm, self.scale);
            let x0 = (center_x - w as f32 / 2.0).round() as i64;
            let y0 = (baseline_y - h as f32).round() as i64;
            fill_rect(img, x0, y0, w, h, PLACEHOLDER);
            return;
        };

        let size_px = mm_to_px(pt_to_mm(font_size_pt), self.scale);
        let scale = Scale::uniform(size_px as f32);

        let width_px = text_width_px(font, text, scale);
        let start_x = (center_x - width_px / 2.0).round();

        for glyph in font.layout(text, scale, point(start_x, baseline_y.round())) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let px = bb.min.x as i64 + gx as i64;
                    let py = bb.min.y as i64 + gy as i64;
                    if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height()
                    {
                        let pixel = img.get_pixel_mut(px as u32, py as u32);
                        for channel in pixel.0.iter_mut() {
                            *channel = (*channel as f32 * (1.0 - v)) as u8;
                        }
                    }
                });
            }
        }
    }

    fn draw_barcode(&self, img: &mut RgbImage, el: &PlacedElement, digits: &str) {
        let w = mm_to_px(el.width_mm, self.scale);
        let h = mm_to_px(el.height_mm, self.scale);
        let glyph = etiqueta_barcode::render(digits, w, h);

        let x0 = (mm_to_px(el.center_x_mm, self.scale) as f32 - w as f32 / 2.0).round() as i64;
        let y0 = mm_to_px(el.y_mm, self.scale) as i64;
        for (gx, gy, p) in glyph.enumerate_pixels() {
            let px = x0 + gx as i64;
            let py = y0 + gy as i64;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                let v = p[0];
                img.put_pixel(px as u32, py as u32, Rgb([v, v, v]));
            }
        }
    }
}

fn text_width_px(font: &Font<'_>, text: &str, scale: Scale) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

fn fill_rect(img: &mut RgbImage, x0: i64, y0: i64, w: u32, h: u32, color: Rgb<u8>) {
    for dy in 0..h {
        for dx in 0..w {
            let px = x0 + dx as i64;
            let py = y0 + dy as i64;
            if px >= 0 && py >= 0 && (px as u32) < img.width() && (py as u32) < img.height() {
                img.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

fn draw_frame(img: &mut RgbImage) {
    let (w, h) = img.dimensions();
    for x in 0..w {
        img.put_pixel(x, 0, FRAME);
        img.put_pixel(x, h - 1, FRAME);
    }
    for y in 0..h {
        img.put_pixel(0, y, FRAME);
        img.put_pixel(w - 1, y, FRAME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etiqueta_layout::{LayoutEngine, LayoutParameters};
    use etiqueta_render_core::HelveticaMetrics;
    use etiqueta_types::{LabelCanvas, LabelRecord};

    fn sample_plan() -> LayoutPlan {
        let record = LabelRecord::new("WIDGET PRO", "SKU-001", "012345678905");
        LayoutEngine::new().compute_plan(
            &record,
            &LayoutParameters::default(),
            LabelCanvas::default(),
            &HelveticaMetrics,
        )
    }

    #[test]
    fn preview_has_canvas_dimensions_at_default_scale() {
        let renderer = PreviewRenderer::new(&FontResource::Builtin);
        let img = renderer.render(&sample_plan());
        // 51 mm x 25 mm at 6 px/mm
        assert_eq!(img.dimensions(), (306, 150));
    }

    #[test]
    fn preview_contains_barcode_bars() {
        let renderer = PreviewRenderer::new(&FontResource::Builtin);
        let img = renderer.render(&sample_plan());
        // Scan the barcode band (top 9.7 mm -> 58 px) for black pixels.
        let y = mm_to_px(12.0, PREVIEW_SCALE);
        let black = (0..img.width()).filter(|&x| img.get_pixel(x, y)[0] == 0).count();
        assert!(black > 0);
    }

    #[test]
    fn preview_is_deterministic() {
        let renderer = PreviewRenderer::new(&FontResource::Builtin);
        let plan = sample_plan();
        assert_eq!(
            renderer.render(&plan).as_raw(),
            renderer.render(&plan).as_raw()
        );
    }
}
