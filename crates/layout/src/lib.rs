//! Backend-agnostic layout engine for 51×25 mm product labels.
//!
//! The engine turns a `LabelRecord` plus a `LayoutParameters` snapshot
//! into a `LayoutPlan`: the exact placement, in millimeters, of the
//! title, SKU, barcode glyph and human-readable code text. Both the
//! raster preview and the PDF renderer consume the same plan, which is
//! what guarantees that what the operator previews is what gets
//! printed.

mod engine;
mod metrics;
mod params;
mod plan;

pub use engine::LayoutEngine;
pub use metrics::TextMetrics;
pub use params::LayoutParameters;
pub use plan::{LayoutPlan, PlacedContent, PlacedElement, TextRole};

// Re-export geometry types used by consumers to prevent type mismatches
pub use etiqueta_types::{LabelCanvas, LabelRecord};
