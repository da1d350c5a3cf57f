//! Turns arbitrary product CSVs into a stream of [`LabelRecord`]s.
//!
//! The pipeline is: read the file with an encoding fallback into a
//! [`Table`], resolve which columns play which role ([`ColumnMap`]),
//! then normalize and replicate rows into records
//! ([`build_labels`]). Resolution is forgiving on purpose: exports
//! from inventory systems rarely agree on header names, so name
//! candidates are tried first and content heuristics after.
//!
//! [`LabelRecord`]: etiqueta_types::LabelRecord

mod columns;
mod error;
mod normalize;
mod table;

pub use columns::{ColumnMap, ColumnOverrides, ColumnRef, QuantityRef, norm_col, resolve_columns};
pub use error::SourceError;
pub use normalize::{build_labels, parse_quantity, strip_non_digits};
pub use table::Table;
