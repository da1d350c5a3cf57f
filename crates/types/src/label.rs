//! The label canvas and the canonical label record.

/// Physical label width in millimeters.
pub const LABEL_WIDTH_MM: f32 = 51.0;
/// Physical label height in millimeters.
pub const LABEL_HEIGHT_MM: f32 = 25.0;

/// The fixed physical surface a label is rendered onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelCanvas {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Default for LabelCanvas {
    fn default() -> Self {
        Self {
            width_mm: LABEL_WIDTH_MM,
            height_mm: LABEL_HEIGHT_MM,
        }
    }
}

/// One normalized label: a title line, a SKU line and the digits to
/// encode as a barcode. Built once per source row (replicated when the
/// quantity column asks for copies) and consumed read-only by rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRecord {
    pub title: String,
    pub sku: String,
    /// Only the characters `0-9`; everything else was stripped during
    /// normalization.
    pub barcode_digits: String,
}

impl LabelRecord {
    pub fn new(
        title: impl Into<String>,
        sku: impl Into<String>,
        barcode_digits: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            sku: sku.into(),
            barcode_digits: barcode_digits.into(),
        }
    }
}
