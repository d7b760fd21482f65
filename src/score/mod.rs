//! Score classification: fixed threshold tables that bucket a numeric
//! score into one of five ordinal categories.
//!
//! Two tables exist and they are not interchangeable: the composite
//! walkability score is bucketed with [`COMPOSITE`], individual sub-index
//! scores with [`SUB_INDEX`]. [`ScoreField::scale`] picks the right one.

mod category;
mod field;
mod thresholds;

pub use category::ScoreCategory;
pub use field::{Scenario, ScoreField, SubIndex};
pub use thresholds::{classify_composite, classify_subindex, Band, Scale, Thresholds, COMPOSITE, SUB_INDEX};
