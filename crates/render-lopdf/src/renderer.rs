use crate::font::{self, FONT_NAME};
use crate::writer::PdfWriter;
use etiqueta_layout::{LayoutPlan, PlacedContent, PlacedElement};
use etiqueta_render_core::utils::{flip_y, to_win_ansi};
use etiqueta_render_core::{DocumentRenderer, FontResource, RenderError};
use etiqueta_types::units::{BARCODE_DPI, mm_to_pt, mm_to_px, px_per_mm};
use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, StringFormat, dictionary};
use std::io::{Seek, Write};

/// Renders layout plans into a multi-page PDF, one fixed-size page per
/// label, in strict input order.
pub struct LabelPdfRenderer<W: Write + Seek> {
    writer: Option<PdfWriter<W>>,
    font: FontResource,
}

impl<W: Write + Seek> LabelPdfRenderer<W> {
    pub fn new(font: FontResource) -> Self {
        Self { writer: None, font }
    }

    fn writer_mut(&mut self) -> Result<&mut PdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("document not started".into()))
    }

    fn draw_text(ops: &mut Vec<Operation>, el: &PlacedElement, text: &str, size_pt: f32, page_height_pt: f32) {
        if text.is_empty() {
            return;
        }
        let x_pt = mm_to_pt(el.center_x_mm - el.width_mm / 2.0);
        let baseline_pt = flip_y(mm_to_pt(el.y_mm), page_height_pt);
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![Object::Name(FONT_NAME.as_bytes().to_vec()), size_pt.into()],
        ));
        ops.push(Operation::new("Td", vec![x_pt.into(), baseline_pt.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn draw_barcode(
        &mut self,
        ops: &mut Vec<Operation>,
        el: &PlacedElement,
        digits: &str,
        page_height_pt: f32,
    ) -> Result<(), RenderError> {
        // Rasterize at print resolution; the glyph is regenerated for
        // every page on purpose (no cache to go stale).
        let scale = px_per_mm(BARCODE_DPI);
        let glyph = etiqueta_barcode::render(
            digits,
            mm_to_px(el.width_mm, scale),
            mm_to_px(el.height_mm, scale),
        );
        let (px_w, px_h) = glyph.dimensions();

        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => px_w as i64,
                "Height" => px_h as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            glyph.into_raw(),
        );
        let name = self.writer_mut()?.add_image_xobject(stream);

        let w_pt = mm_to_pt(el.width_mm);
        let h_pt = mm_to_pt(el.height_mm);
        let x_pt = mm_to_pt(el.center_x_mm - el.width_mm / 2.0);
        // `cm` places the unit image square from its bottom-left corner.
        let bottom_pt = flip_y(mm_to_pt(el.y_mm + el.height_mm), page_height_pt);

        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                w_pt.into(),
                0.0.into(),
                0.0.into(),
                h_pt.into(),
                x_pt.into(),
                bottom_pt.into(),
            ],
        ));
        ops.push(Operation::new(
            "Do",
            vec![Object::Name(name.into_bytes())],
        ));
        ops.push(Operation::new("Q", vec![]));
        Ok(())
    }
}

impl<W: Write + Seek> DocumentRenderer<W> for LabelPdfRenderer<W> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError> {
        let mut pdf = PdfWriter::new(writer)?;
        let font_dict = font::build_font_dict(&mut pdf, &self.font)?;
        pdf.set_font_dict(font_dict);
        self.writer = Some(pdf);
        Ok(())
    }

    fn render_label(&mut self, plan: &LayoutPlan) -> Result<(), RenderError> {
        let page_width_pt = mm_to_pt(plan.canvas.width_mm);
        let page_height_pt = mm_to_pt(plan.canvas.height_mm);

        let mut ops = Vec::new();
        for el in &plan.elements {
            match &el.content {
                PlacedContent::Text { text, font_size_pt, .. } => {
                    Self::draw_text(&mut ops, el, text, *font_size_pt, page_height_pt);
                }
                PlacedContent::Barcode { digits } => {
                    self.draw_barcode(&mut ops, el, digits, page_height_pt)?;
                }
            }
        }

        let writer = self.writer_mut()?;
        let content_id = writer.add_content_stream(Content { operations: ops })?;
        writer.add_page(content_id, page_width_pt, page_height_pt);
        log::trace!("rendered page {}", writer.page_count());
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError> {
        let renderer = *self;
        match renderer.writer {
            Some(writer) => writer.finish(),
            None => Err(RenderError::Other(
                "document was never started with begin_document".into(),
            )),
        }
    }
}
