//! Raster preview renderer.
//!
//! Paints a single `LayoutPlan` into an in-memory RGB image at a fixed
//! pixels-per-millimeter scale. All geometry comes from the plan and is
//! converted through the shared unit converter; this backend only
//! contributes pixels.

mod renderer;

pub use renderer::PreviewRenderer;
