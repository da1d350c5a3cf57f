//! Unit conversion between physical millimeters, typographic points and
//! backend pixels.
//!
//! Every coordinate the two renderers emit goes through these functions.
//! The raster and vector backends must never round differently from one
//! another, so neither backend is allowed to convert units on its own.

/// Exact size of one typographic point, in millimeters.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Pixels per millimeter used by the on-screen preview.
pub const PREVIEW_SCALE: f32 = 6.0;

/// Raster resolution used when rasterizing barcode glyphs for the PDF.
pub const BARCODE_DPI: f32 = 300.0;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_PT
}

/// Converts millimeters to whole pixels at `scale` pixels per millimeter.
///
/// Rounds to nearest and never returns less than one pixel; negative
/// input therefore also saturates to one pixel, which keeps the two
/// backends consistent for degenerate parameter values.
pub fn mm_to_px(mm: f32, scale: f32) -> u32 {
    (mm * scale).round().max(1.0) as u32
}

/// Pixels per millimeter at a given dots-per-inch resolution.
pub fn px_per_mm(dpi: f32) -> f32 {
    dpi / 25.4
}
