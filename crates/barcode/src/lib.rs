//! Barcode glyph provider.
//!
//! Turns a digit string into a black/white bitmap of an exact pixel
//! size. Symbol encoding itself is delegated to the `barcoders` crate;
//! this crate owns symbology selection, module-image scaling and the
//! failure fallback. Glyphs are regenerated on every render on purpose:
//! a cache keyed on anything less than `(digits, width, height)` is a
//! stale-bitmap bug waiting to happen.

mod provider;
mod symbology;

pub use provider::render;
pub use symbology::{Symbology, select_symbology};
