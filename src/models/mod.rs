pub mod document;
pub mod row;

pub use document::{value_text, DocumentStruct, LineItem};
pub use row::{ComparisonRow, MatchStatus, MatchSummary, PairComparison};
