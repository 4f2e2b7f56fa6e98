use crate::models::{ComparisonRow, DocumentStruct, LineItem, MatchStatus, MatchSummary, PairComparison};
use crate::service::similarity;
use indexmap::IndexSet;
use rayon::prelude::*;

/// Pairs purchase-order items with invoice items one-to-one and classifies
/// each pairing.
///
/// Greedy over PO items in input order: each PO item scores every
/// still-unclaimed invoice item and takes the strictly best candidate.
/// The candidate is claimed only when its score reaches `threshold`;
/// a sub-threshold best candidate is still surfaced in the row's invoice
/// columns so the caller can see what it almost matched. Input order is
/// part of the contract here, not an iteration accident: it decides claim
/// precedence when two PO items compete for the same invoice line.
///
/// Output: one row per PO item, then one `Mismatch` row per invoice item
/// nothing claimed. Missing documents and missing item lists reconcile as
/// empty, never as errors.
pub fn reconcile(
    po: Option<&DocumentStruct>,
    invoice: Option<&DocumentStruct>,
    threshold: f64,
) -> Vec<ComparisonRow> {
    let po_items: &[LineItem] = po.map(|d| d.items.as_slice()).unwrap_or_default();
    let inv_items: &[LineItem] = invoice.map(|d| d.items.as_slice()).unwrap_or_default();

    let mut claimed: IndexSet<usize> = IndexSet::new();
    let mut rows = Vec::with_capacity(po_items.len());

    for po_it in po_items {
        let mut best_score = 0.0_f64;
        let mut best_idx: Option<usize> = None;

        for (idx, inv_it) in inv_items.iter().enumerate() {
            if claimed.contains(&idx) {
                continue;
            }
            let score = similarity::score(&po_it.description, &inv_it.description);
            if score > best_score {
                best_score = score;
                best_idx = Some(idx);
            }
        }

        // Claim only above threshold; the candidate stays available to
        // later PO items otherwise.
        let mut eligible = false;
        if let Some(idx) = best_idx {
            if best_score >= threshold {
                claimed.insert(idx);
                eligible = true;
            }
        }

        let best = best_idx.map(|idx| &inv_items[idx]);
        let status = classify(eligible, po_it, best);

        tracing::debug!(
            "PO item '{}' best score {:.2} -> {}",
            po_it.description,
            best_score,
            status
        );

        rows.push(ComparisonRow {
            po_description: po_it.description.clone(),
            po_qty: po_it.qty.clone(),
            po_price: po_it.unit_price.clone(),
            po_total: po_it.total.clone(),
            invoice_description: best.map(|i| i.description.clone()).unwrap_or_default(),
            invoice_qty: best.and_then(|i| i.qty.clone()),
            invoice_price: best.and_then(|i| i.unit_price.clone()),
            invoice_total: best.and_then(|i| i.total.clone()),
            status,
            match_score: round2(best_score),
        });
    }

    // Invoice items nothing claimed trail the PO rows, in input order.
    for (idx, inv_it) in inv_items.iter().enumerate() {
        if claimed.contains(&idx) {
            continue;
        }
        rows.push(ComparisonRow {
            po_description: String::new(),
            po_qty: None,
            po_price: None,
            po_total: None,
            invoice_description: inv_it.description.clone(),
            invoice_qty: inv_it.qty.clone(),
            invoice_price: inv_it.unit_price.clone(),
            invoice_total: inv_it.total.clone(),
            status: MatchStatus::Mismatch,
            match_score: 0.0,
        });
    }

    rows
}

/// `Match` needs an eligible pairing and textually equal totals, both
/// present; an eligible pairing with differing or missing totals is a
/// `PartialMatch`.
fn classify(eligible: bool, po_it: &LineItem, inv_it: Option<&LineItem>) -> MatchStatus {
    if !eligible {
        return MatchStatus::Mismatch;
    }
    let totals_equal = match (po_it.total_text(), inv_it.and_then(LineItem::total_text)) {
        (Some(po_total), Some(inv_total)) => po_total == inv_total,
        _ => false,
    };
    if totals_equal {
        MatchStatus::Match
    } else {
        MatchStatus::PartialMatch
    }
}

/// The fold the presentation side renders: exact-match rows over all rows.
pub fn summarize(rows: &[ComparisonRow]) -> MatchSummary {
    let matched_rows = rows
        .iter()
        .filter(|r| r.status == MatchStatus::Match)
        .count();
    let total_rows = rows.len();
    let match_rate = if total_rows == 0 {
        0.0
    } else {
        matched_rows as f64 / total_rows as f64
    };
    MatchSummary {
        matched_rows,
        total_rows,
        match_rate,
    }
}

/// Reconciles N document pairs, pairing by position; the shorter list is
/// padded with missing documents. Pairs are independent, so they run in
/// parallel; the result keeps pair-index order.
pub fn reconcile_pairs(
    pos: &[Option<DocumentStruct>],
    invoices: &[Option<DocumentStruct>],
    threshold: f64,
) -> Vec<PairComparison> {
    let pair_count = pos.len().max(invoices.len());
    tracing::info!("Comparing {} document pairs (threshold {})", pair_count, threshold);

    let results: Vec<PairComparison> = (0..pair_count)
        .into_par_iter()
        .map(|pair_index| {
            let po = pos.get(pair_index).and_then(Option::as_ref);
            let invoice = invoices.get(pair_index).and_then(Option::as_ref);
            let rows = reconcile(po, invoice, threshold);
            let summary = summarize(&rows);
            PairComparison {
                pair_index,
                rows,
                summary,
            }
        })
        .collect();

    let matched: usize = results.iter().map(|r| r.summary.matched_rows).sum();
    let total: usize = results.iter().map(|r| r.summary.total_rows).sum();
    tracing::info!(
        "Compared {} pairs: {}/{} items matched",
        pair_count,
        matched,
        total
    );

    results
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(description: &str, total: Option<serde_json::Value>) -> LineItem {
        LineItem {
            description: description.to_string(),
            qty: None,
            unit_price: None,
            total,
        }
    }

    fn doc(items: Vec<LineItem>) -> DocumentStruct {
        DocumentStruct {
            items,
            ..DocumentStruct::default()
        }
    }

    #[test]
    fn missing_documents_reconcile_empty() {
        assert!(reconcile(None, None, 0.7).is_empty());
        let empty = doc(vec![]);
        assert!(reconcile(Some(&empty), None, 0.7).is_empty());
        assert!(reconcile(None, Some(&empty), 0.7).is_empty());
    }

    #[test]
    fn equal_totals_above_threshold_match() {
        let po = doc(vec![item("Widget A", Some(json!(50)))]);
        let inv = doc(vec![item("Widget A", Some(json!(50)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatchStatus::Match);
        assert_eq!(rows[0].match_score, 1.0);
    }

    #[test]
    fn string_and_number_totals_compare_as_text() {
        // "50" and 50 render to the same text
        let po = doc(vec![item("Widget A", Some(json!("50")))]);
        let inv = doc(vec![item("Widget A", Some(json!(50)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows[0].status, MatchStatus::Match);

        // 50 and 50.0 do not
        let po = doc(vec![item("Widget A", Some(json!(50)))]);
        let inv = doc(vec![item("Widget A", Some(json!(50.0)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows[0].status, MatchStatus::PartialMatch);
    }

    #[test]
    fn missing_total_downgrades_to_partial_match() {
        let po = doc(vec![item("Widget A", None)]);
        let inv = doc(vec![item("Widget A", None)]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows[0].status, MatchStatus::PartialMatch);
    }

    #[test]
    fn empty_invoice_yields_mismatch_rows_with_blank_invoice_columns() {
        let po = doc(vec![
            item("Widget A", Some(json!(50))),
            item("Widget B", Some(json!(30))),
        ]);
        let inv = doc(vec![]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.status, MatchStatus::Mismatch);
            assert_eq!(row.match_score, 0.0);
            assert!(row.invoice_description.is_empty());
            assert!(row.invoice_total.is_none());
        }
    }

    #[test]
    fn leftover_invoice_items_trail_with_blank_po_columns() {
        let po = doc(vec![]);
        let inv = doc(vec![item("Freight surcharge", Some(json!(12)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatchStatus::Mismatch);
        assert_eq!(rows[0].match_score, 0.0);
        assert!(rows[0].po_description.is_empty());
        assert_eq!(rows[0].invoice_description, "Freight surcharge");
        assert_eq!(rows[0].invoice_total, Some(json!(12)));
    }

    #[test]
    fn first_po_item_wins_a_contested_invoice_item() {
        let po = doc(vec![
            item("Widget A", Some(json!(50))),
            item("Widget A", Some(json!(50))),
        ]);
        let inv = doc(vec![item("Widget A", Some(json!(50)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, MatchStatus::Match);
        // nothing left for the second PO item
        assert_eq!(rows[1].status, MatchStatus::Mismatch);
        assert!(rows[1].invoice_description.is_empty());
        assert_eq!(rows[1].match_score, 0.0);
    }

    #[test]
    fn sub_threshold_best_candidate_is_surfaced_but_unclaimed() {
        let po = doc(vec![item("Widget A", Some(json!(50)))]);
        let inv = doc(vec![item("Widget A HS1234", Some(json!(50)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        // score 0.68 stays under 0.70, so the pairing is reported but not
        // claimed and the invoice item reappears as a leftover row
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, MatchStatus::Mismatch);
        assert_eq!(rows[0].invoice_description, "Widget A HS1234");
        assert_eq!(rows[0].match_score, 0.68);
        assert_eq!(rows[1].invoice_description, "Widget A HS1234");
        assert_eq!(rows[1].status, MatchStatus::Mismatch);
    }

    #[test]
    fn hs_code_suffix_matches_at_lower_threshold() {
        let po = doc(vec![item("Widget A", Some(json!(50)))]);
        let inv = doc(vec![item("Widget A HS1234", Some(json!(50)))]);
        let rows = reconcile(Some(&po), Some(&inv), 0.65);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatchStatus::Match);
        assert_eq!(rows[0].match_score, 0.68);
    }

    #[test]
    fn zero_score_candidates_are_never_selected() {
        // nothing in common: invoice columns stay blank even though a
        // candidate exists
        let po = doc(vec![item("aaaa", None)]);
        let inv = doc(vec![item("zzzz", None)]);
        let rows = reconcile(Some(&po), Some(&inv), 0.1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, MatchStatus::Mismatch);
        assert!(rows[0].invoice_description.is_empty());
        assert_eq!(rows[0].match_score, 0.0);
    }

    #[test]
    fn ties_keep_the_first_candidate_seen() {
        let po = doc(vec![item("Widget A", Some(json!(50)))]);
        let inv = doc(vec![
            item("Widget A", Some(json!(50))),
            item("Widget A", Some(json!(99))),
        ]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        assert_eq!(rows[0].invoice_total, Some(json!(50)));
        assert_eq!(rows[0].status, MatchStatus::Match);
        // the equal-scoring duplicate is left over
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].invoice_total, Some(json!(99)));
    }

    #[test]
    fn summarize_counts_exact_matches_only() {
        let po = doc(vec![
            item("Widget A", Some(json!(50))),
            item("Widget B", Some(json!(30))),
        ]);
        let inv = doc(vec![
            item("Widget A", Some(json!(50))),
            item("Widget B", Some(json!(31))),
        ]);
        let rows = reconcile(Some(&po), Some(&inv), 0.7);
        let summary = summarize(&rows);
        assert_eq!(summary.matched_rows, 1);
        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.match_rate, 0.5);
    }

    #[test]
    fn summarize_empty_rows_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.matched_rows, 0);
        assert_eq!(summary.total_rows, 0);
        assert_eq!(summary.match_rate, 0.0);
    }

    #[test]
    fn pairs_align_by_position_and_pad_the_short_side() {
        let pos = vec![
            Some(doc(vec![item("Widget A", Some(json!(50)))])),
            Some(doc(vec![item("Widget B", Some(json!(30)))])),
        ];
        let invoices = vec![Some(doc(vec![item("Widget A", Some(json!(50)))]))];
        let results = reconcile_pairs(&pos, &invoices, 0.7);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].pair_index, 0);
        assert_eq!(results[0].summary.matched_rows, 1);
        // second pair has no invoice at all
        assert_eq!(results[1].pair_index, 1);
        assert_eq!(results[1].rows.len(), 1);
        assert_eq!(results[1].rows[0].status, MatchStatus::Mismatch);
    }
}
