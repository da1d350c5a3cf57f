//! End-to-end label pipeline.
//!
//! Wires the layout engine to both renderers behind one font and one
//! set of text metrics, so a record is measured exactly once and the
//! resulting plan is what the preview shows and the PDF prints.

mod error;

use etiqueta_layout::{LayoutEngine, LayoutParameters, LayoutPlan, TextMetrics};
use etiqueta_render_core::{DocumentRenderer, FontResource};
use etiqueta_render_lopdf::LabelPdfRenderer;
use etiqueta_render_raster::PreviewRenderer;
use etiqueta_types::{LabelCanvas, LabelRecord};
use image::RgbImage;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

pub use error::PipelineError;

pub struct LabelPipeline {
    params: LayoutParameters,
    canvas: LabelCanvas,
    font: FontResource,
    metrics: Box<dyn TextMetrics + Send + Sync>,
    engine: LayoutEngine,
}

impl LabelPipeline {
    /// Builds a pipeline with the platform-resolved label font.
    pub fn new(params: LayoutParameters) -> Self {
        Self::with_font(params, FontResource::resolve())
    }

    pub fn with_font(params: LayoutParameters, font: FontResource) -> Self {
        let metrics = font.metrics();
        Self {
            params,
            canvas: LabelCanvas::default(),
            font,
            metrics,
            engine: LayoutEngine::new(),
        }
    }

    pub fn params(&self) -> &LayoutParameters {
        &self.params
    }

    /// Computes the placement plan for one record. Both output paths
    /// below go through here, never around it.
    pub fn plan(&self, record: &LabelRecord) -> LayoutPlan {
        self.engine
            .compute_plan(record, &self.params, self.canvas, self.metrics.as_ref())
    }

    /// Renders an on-screen preview of a single record.
    pub fn preview(&self, record: &LabelRecord) -> RgbImage {
        PreviewRenderer::new(&self.font).render(&self.plan(record))
    }

    /// Writes one PDF page per record, in input order, and returns the
    /// writer once the trailer is out.
    pub fn generate_pdf<W: Write + Seek>(
        &self,
        records: &[LabelRecord],
        writer: W,
    ) -> Result<W, PipelineError> {
        let mut renderer = Box::new(LabelPdfRenderer::new(self.font.clone()));
        renderer.begin_document(writer)?;
        for record in records {
            renderer.render_label(&self.plan(record))?;
        }
        log::info!("rendered {} pdf pages", records.len());
        Ok(renderer.finish()?)
    }

    pub fn generate_pdf_file(
        &self,
        records: &[LabelRecord],
        path: &Path,
    ) -> Result<(), PipelineError> {
        let file = File::create(path)?;
        let mut writer = self.generate_pdf(records, BufWriter::new(file))?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for LabelPipeline {
    fn default() -> Self {
        Self::new(LayoutParameters::default())
    }
}
