//! Startup font resolution.
//!
//! A single human-readable typeface is resolved once: first from a
//! ranked list of well-known platform font paths, then via fontdb
//! system discovery. If neither yields a parseable face the backends
//! fall back to built-in Helvetica metrics, which still satisfy the
//! ascent-based baseline contract.

use crate::metrics::{HelveticaMetrics, TtfMetrics};
use etiqueta_layout::TextMetrics;
use std::sync::Arc;

/// Well-known sans-serif font locations, most preferred first.
const FONT_PATHS: &[&str] = &[
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/segoeui.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// The typeface both renderers draw with.
#[derive(Clone)]
pub enum FontResource {
    /// A resolved TrueType/OpenType file; embedded into the PDF and
    /// rasterized for the preview.
    Embedded(Arc<Vec<u8>>),
    /// No usable font file on this system; backends use their built-in
    /// Helvetica path instead.
    Builtin,
}

impl FontResource {
    /// Resolves the typeface from the ranked path list, then fontdb.
    pub fn resolve() -> Self {
        for path in FONT_PATHS {
            if let Ok(data) = std::fs::read(path) {
                if ttf_parser::Face::parse(&data, 0).is_ok() {
                    log::debug!("resolved label font from {path}");
                    return Self::Embedded(Arc::new(data));
                }
                log::debug!("font at {path} is not parseable, skipping");
            }
        }
        if let Some(data) = resolve_from_fontdb() {
            return Self::Embedded(Arc::new(data));
        }
        log::warn!("no usable system font found, falling back to built-in Helvetica metrics");
        Self::Builtin
    }

    /// The canonical measurement implementation for this resource.
    ///
    /// Computed once and shared by every layout call, so both renderers
    /// consume plans built from identical measurements.
    pub fn metrics(&self) -> Box<dyn TextMetrics + Send + Sync> {
        match self {
            Self::Embedded(data) => match TtfMetrics::new(data.clone()) {
                Some(m) => Box::new(m),
                None => Box::new(HelveticaMetrics),
            },
            Self::Builtin => Box::new(HelveticaMetrics),
        }
    }

    pub fn data(&self) -> Option<Arc<Vec<u8>>> {
        match self {
            Self::Embedded(data) => Some(data.clone()),
            Self::Builtin => None,
        }
    }

    /// PostScript name of the resolved face, for PDF font dictionaries.
    pub fn postscript_name(&self) -> Option<String> {
        let data = self.data()?;
        let face = ttf_parser::Face::parse(&data, 0).ok()?;
        face.names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|n| n.to_string())
            .or_else(|| {
                face.names()
                    .into_iter()
                    .find(|n| n.name_id == ttf_parser::name_id::FULL_NAME)
                    .and_then(|n| n.to_string())
                    .map(|s| s.replace(' ', ""))
            })
    }
}

fn resolve_from_fontdb() -> Option<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    let face_info = db.face(id)?;

    let data = match &face_info.source {
        fontdb::Source::Binary(data) => data.as_ref().as_ref().to_vec(),
        fontdb::Source::File(path) => {
            log::debug!("resolved label font via fontdb: {}", path.display());
            std::fs::read(path).ok()?
        }
        _ => return None,
    };
    if ttf_parser::Face::parse(&data, 0).is_err() {
        return None;
    }
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resource_has_metrics_and_no_data() {
        let font = FontResource::Builtin;
        assert!(font.data().is_none());
        let metrics = font.metrics();
        // Ascent must be obtainable even without a font file.
        assert!(metrics.ascent_mm(9.0) > 0.0);
    }

    #[test]
    fn resolve_never_panics() {
        // Result depends on the host system; both variants are fine.
        let _ = FontResource::resolve();
    }
}
