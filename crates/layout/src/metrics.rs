/// Text measurement capability supplied by a rendering backend.
///
/// The engine never assumes a specific measurement mechanism, only that
/// one exists and is deterministic for a given font size and string.
/// Each backend implements this exactly once; the same implementation
/// also defines the ascent used for baseline anchoring, so the two
/// renderers cannot drift apart on where text sits vertically.
pub trait TextMetrics {
    /// Width of `text` when set at `font_size_pt`, in millimeters.
    fn measure_width_mm(&self, text: &str, font_size_pt: f32) -> f32;

    /// Ascent of the typeface at `font_size_pt`, in millimeters.
    ///
    /// Renderers draw text with `top = baseline - ascent`, so this must
    /// be obtainable even for a fallback font.
    fn ascent_mm(&self, font_size_pt: f32) -> f32;
}
