//! Print-ready PDF renderer using lopdf.
//!
//! Emits one 51×25 mm page per label plan into a hand-written PDF:
//! text as WinAnsi content-stream operations, the barcode as a
//! DeviceGray image XObject rasterized at print resolution. All
//! coordinates pass through the shared unit converter; the only
//! backend-specific step is the Y-axis flip into PDF's bottom-up space.

mod font;
mod renderer;
mod writer;

pub use renderer::LabelPdfRenderer;
pub use writer::PdfWriter;
