//! Row-level transforms: name splitting, workplace merging, normalization
//! and deduplication

pub mod dedup;
pub mod names;
pub mod normalize;
pub mod workplace;

pub use dedup::{DuplicatePolicy, deduplicate};
pub use names::{HeuristicNameSplitter, NameSplitter};
pub use normalize::{NameMode, RowOutcome, SheetLayout, normalize_row};
