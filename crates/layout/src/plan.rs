use etiqueta_types::LabelCanvas;

/// Which of the three text lines an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Sku,
    /// The human-readable digits under the barcode.
    CodeText,
}

/// The payload of a placed element.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedContent {
    Text {
        role: TextRole,
        text: String,
        font_size_pt: f32,
    },
    Barcode {
        digits: String,
    },
}

/// One element of a layout plan, in millimeters from the top-left
/// corner of the label.
///
/// For text `y_mm` is the baseline; for the barcode glyph it is the top
/// edge of the box. Renderers anchor text with `top = baseline -
/// ascent` so the glyphs sit visually on the computed baseline
/// regardless of backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub content: PlacedContent,
    pub center_x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

/// The complete geometric placement for one label, produced fresh per
/// render call and consumed immediately by exactly one renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub canvas: LabelCanvas,
    /// Elements in paint order: title, SKU, barcode glyph, code text.
    pub elements: Vec<PlacedElement>,
}

impl LayoutPlan {
    pub fn barcode(&self) -> Option<&PlacedElement> {
        self.elements
            .iter()
            .find(|el| matches!(el.content, PlacedContent::Barcode { .. }))
    }

    pub fn text(&self, role: TextRole) -> Option<&PlacedElement> {
        self.elements.iter().find(
            |el| matches!(&el.content, PlacedContent::Text { role: r, .. } if *r == role),
        )
    }
}
