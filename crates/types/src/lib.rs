pub mod label;
pub mod units;

pub use label::{LabelCanvas, LabelRecord};
