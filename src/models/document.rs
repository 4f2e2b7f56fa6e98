use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One line of a structured commercial document.
///
/// The numeric fields are pass-through values produced by an upstream
/// document-structuring step: they may arrive as JSON numbers or as
/// strings ("12", 12, 12.0 are all legal) and are never parsed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub qty: Option<Value>,
    #[serde(default)]
    pub unit_price: Option<Value>,
    #[serde(default)]
    pub total: Option<Value>,
}

impl LineItem {
    /// Textual form of `total` for the match/partial-match decision.
    /// JSON strings render without quotes so `"50"` and `50` stay distinct
    /// from each other only by what the extractor produced, not by quoting.
    pub fn total_text(&self) -> Option<String> {
        self.total.as_ref().map(value_text)
    }
}

/// Renders a pass-through value the way a human (or a CSV cell) reads it.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Structured purchase order or invoice, as delivered by the upstream
/// extractor. Reconciliation only reads `items`; every header field is
/// carried for the surrounding application. A missing `items` key
/// deserializes to an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStruct {
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub grand_total: Option<Value>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}
