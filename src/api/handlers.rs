use crate::config::AppConfig;
use crate::export;
use crate::models::{ComparisonRow, DocumentStruct, MatchSummary, PairComparison};
use crate::service::{reconcile, reconcile_pairs, summarize};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body: one structured PO/invoice pair. Either document may be
/// null or omitted; `threshold` falls back to the configured default.
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub po: Option<DocumentStruct>,
    #[serde(default)]
    pub invoice: Option<DocumentStruct>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Response body
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub success: bool,
    pub message: String,
    pub rows: Vec<ComparisonRow>,
    pub summary: MatchSummary,
    pub compared_at: DateTime<Utc>,
}

/// Request body: positionally paired document lists
#[derive(Debug, Deserialize)]
pub struct BatchCompareRequest {
    #[serde(default)]
    pub pos: Vec<Option<DocumentStruct>>,
    #[serde(default)]
    pub invoices: Vec<Option<DocumentStruct>>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// Batch response body (per-pair results plus totals)
#[derive(Debug, Serialize)]
pub struct BatchCompareResponse {
    pub success: bool,
    pub message: String,
    pub results: Vec<PairComparison>,
    pub compared_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Compares one PO/invoice pair
pub async fn compare(
    State(config): State<Arc<AppConfig>>,
    Json(req): Json<CompareRequest>,
) -> Response {
    let threshold = req.threshold.unwrap_or(config.matching.threshold);
    let rows = reconcile(req.po.as_ref(), req.invoice.as_ref(), threshold);
    let summary = summarize(&rows);

    let response = CompareResponse {
        success: true,
        message: format!(
            "{}/{} items matched",
            summary.matched_rows, summary.total_rows
        ),
        rows,
        summary,
        compared_at: Utc::now(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Compares many pairs, aligned by position
pub async fn batch_compare(
    State(config): State<Arc<AppConfig>>,
    Json(req): Json<BatchCompareRequest>,
) -> Response {
    let threshold = req.threshold.unwrap_or(config.matching.threshold);
    let results = reconcile_pairs(&req.pos, &req.invoices, threshold);

    let matched: usize = results.iter().map(|r| r.summary.matched_rows).sum();
    let total: usize = results.iter().map(|r| r.summary.total_rows).sum();

    let response = BatchCompareResponse {
        success: true,
        message: format!(
            "Successfully compared {} pairs, {}/{} items matched",
            results.len(),
            matched,
            total
        ),
        results,
        compared_at: Utc::now(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Compares one pair and responds with the rows as CSV
pub async fn compare_csv(
    State(config): State<Arc<AppConfig>>,
    Json(req): Json<CompareRequest>,
) -> Response {
    let threshold = req.threshold.unwrap_or(config.matching.threshold);
    let rows = reconcile(req.po.as_ref(), req.invoice.as_ref(), threshold);

    match export::rows_to_csv(&rows) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(e) => {
            let response = ErrorResponse {
                success: false,
                message: format!("Error: {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}
