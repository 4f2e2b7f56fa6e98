use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Verdict for one comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Match,
    #[serde(rename = "Partial Match")]
    PartialMatch,
    Mismatch,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStatus::Match => write!(f, "Match"),
            MatchStatus::PartialMatch => write!(f, "Partial Match"),
            MatchStatus::Mismatch => write!(f, "Mismatch"),
        }
    }
}

/// One output row of a reconciliation: a PO item with its best invoice
/// candidate (columns blank when there is none), or a leftover invoice
/// item with the PO columns blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub po_description: String,
    pub po_qty: Option<Value>,
    pub po_price: Option<Value>,
    pub po_total: Option<Value>,
    pub invoice_description: String,
    pub invoice_qty: Option<Value>,
    pub invoice_price: Option<Value>,
    pub invoice_total: Option<Value>,
    pub status: MatchStatus,
    pub match_score: f64,
}

/// Aggregate over one reconciliation's rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matched_rows: usize,
    pub total_rows: usize,
    pub match_rate: f64,
}

/// Result for one PO/invoice pair of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairComparison {
    pub pair_index: usize,
    pub rows: Vec<ComparisonRow>,
    pub summary: MatchSummary,
}
