//! Core rendering abstractions shared by both label renderers:
//! - `DocumentRenderer` trait for paginated output
//! - `FontResource` resolution (ranked platform paths, then fontdb)
//! - the canonical `TextMetrics` implementations both backends share
//! - error types and coordinate helpers

mod error;
mod fonts;
mod metrics;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use fonts::FontResource;
pub use metrics::{HelveticaMetrics, TtfMetrics};
pub use traits::DocumentRenderer;
