pub mod api;
pub mod config;
pub mod export;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use models::{ComparisonRow, DocumentStruct, LineItem, MatchStatus, MatchSummary, PairComparison};
pub use service::{reconcile, reconcile_pairs, score, summarize};
