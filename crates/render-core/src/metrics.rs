//! The canonical `TextMetrics` implementations.
//!
//! One of these is chosen at startup (depending on whether a real font
//! file was resolved) and then used for every layout computation, so
//! the preview and the PDF are laid out from identical measurements.

use etiqueta_layout::TextMetrics;
use etiqueta_types::units::pt_to_mm;
use std::sync::Arc;
use ttf_parser::Face;

/// Metrics read from a resolved TrueType/OpenType file via `ttf-parser`.
///
/// The face view is re-parsed per call; that is a header parse only and
/// avoids a self-referential struct over the font bytes.
pub struct TtfMetrics {
    data: Arc<Vec<u8>>,
}

impl TtfMetrics {
    /// Fails if the bytes are not a parseable font face.
    pub fn new(data: Arc<Vec<u8>>) -> Option<Self> {
        Face::parse(&data, 0).ok()?;
        Some(Self { data })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, 0).ok()
    }

    fn width_units(face: &Face<'_>, text: &str) -> u32 {
        let fallback = (face.units_per_em() / 2) as u32;
        text.chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|g| face.glyph_hor_advance(g))
                    .map(u32::from)
                    .unwrap_or(fallback)
            })
            .sum()
    }
}

impl TextMetrics for TtfMetrics {
    fn measure_width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let units = Self::width_units(&face, text) as f32;
        pt_to_mm(units * font_size_pt / face.units_per_em() as f32)
    }

    fn ascent_mm(&self, font_size_pt: f32) -> f32 {
        let Some(face) = self.face() else {
            return pt_to_mm(font_size_pt * 0.8);
        };
        pt_to_mm(face.ascender() as f32 * font_size_pt / face.units_per_em() as f32)
    }
}

/// Standard Helvetica AFM advance widths for `0x20..=0x7E`, in
/// thousandths of an em. Used when no font file could be resolved; the
/// same table also feeds the non-embedded Type1 widths array in the PDF
/// backend, so measurement and viewer agree.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // 'a'..'p'
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'q'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const HELVETICA_ASCENT: f32 = 718.0;
const DEFAULT_WIDTH: f32 = 556.0;

/// Built-in Helvetica metrics, the fallback when no font file resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    /// Advance width of `c` in thousandths of an em.
    pub fn char_width_units(c: char) -> f32 {
        let code = c as u32;
        match code.checked_sub(0x20) {
            Some(i) if (i as usize) < HELVETICA_WIDTHS.len() => HELVETICA_WIDTHS[i as usize] as f32,
            _ => DEFAULT_WIDTH,
        }
    }
}

impl TextMetrics for HelveticaMetrics {
    fn measure_width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        let units: f32 = text.chars().map(Self::char_width_units).sum();
        pt_to_mm(units * font_size_pt / 1000.0)
    }

    fn ascent_mm(&self, font_size_pt: f32) -> f32 {
        pt_to_mm(HELVETICA_ASCENT * font_size_pt / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_digit_width() {
        // Digits are all 556/1000 em wide.
        let w = HelveticaMetrics.measure_width_mm("0123456789", 10.0);
        let expected = pt_to_mm(10.0 * 556.0 * 10.0 / 1000.0);
        assert!((w - expected).abs() < 1e-4);
    }

    #[test]
    fn helvetica_ascent_scales_with_size() {
        let a = HelveticaMetrics.ascent_mm(10.0);
        let b = HelveticaMetrics.ascent_mm(20.0);
        assert!((b - 2.0 * a).abs() < 1e-4);
    }

    #[test]
    fn helvetica_empty_string_is_zero_wide() {
        assert_eq!(HelveticaMetrics.measure_width_mm("", 9.0), 0.0);
    }

    #[test]
    fn out_of_table_chars_use_default_width() {
        assert_eq!(HelveticaMetrics::char_width_units('é'), DEFAULT_WIDTH);
    }
}
