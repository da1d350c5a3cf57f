use crate::error::RenderError;
use etiqueta_layout::LayoutPlan;
use std::io::{Seek, Write};

/// A paginated document renderer: one fixed-size page per label.
///
/// Pages are written strictly in the order `render_label` is called,
/// and the document is only valid once `finish` has run. A writer that
/// errors mid-run leaves a partial document behind; callers must report
/// that as a failed run, never as a complete one.
pub trait DocumentRenderer<W: Write + Seek> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError>;

    /// Appends one page rendered from `plan`.
    fn render_label(&mut self, plan: &LayoutPlan) -> Result<(), RenderError>;

    /// Finalizes and flushes the document, returning the writer.
    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}
