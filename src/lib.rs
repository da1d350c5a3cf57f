//! Product label generator for 51×25 mm thermal stock.
//!
//! Reads a product CSV, resolves which columns hold the title, SKU,
//! barcode and quantity, and renders one label per requested copy: a
//! raster preview for the operator and a paginated, print-ready PDF.
//! Both outputs are painted from the same millimeter-based
//! [`LayoutPlan`], so the preview is a faithful picture of the print.
//!
//! ```no_run
//! use etiqueta::{LabelPipeline, LabelRecord, LayoutParameters};
//!
//! let pipeline = LabelPipeline::new(LayoutParameters::default());
//! let record = LabelRecord::new("WIDGET PRO", "SKU-001", "4006381333931");
//! let preview = pipeline.preview(&record);
//! # let _ = preview;
//! ```

pub use etiqueta_barcode::{Symbology, select_symbology};
pub use etiqueta_core::{LabelPipeline, PipelineError};
pub use etiqueta_layout::{LayoutEngine, LayoutParameters, LayoutPlan, TextMetrics, TextRole};
pub use etiqueta_render_core::{DocumentRenderer, FontResource, RenderError};
pub use etiqueta_render_lopdf::LabelPdfRenderer;
pub use etiqueta_render_raster::PreviewRenderer;
pub use etiqueta_source::{
    ColumnMap, ColumnOverrides, SourceError, Table, build_labels, resolve_columns,
};
pub use etiqueta_types::units;
pub use etiqueta_types::{LabelCanvas, LabelRecord};
