use crate::config::HighlightConfig;
use crate::highlight::locate::locate_clauses;
use crate::highlight::model::{ClauseDescriptor, RiskTier};
use crate::highlight::normalize::canonicalize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpanMark {
    pub risk_tier: RiskTier,
    pub clause_index: usize,
}

/// Mark the text spans of one rendered PDF page.
///
/// A PDF viewer's text layer breaks a page into positioned spans whose
/// boundaries have nothing to do with clause boundaries. The spans are joined
/// in canonical form, clauses are located in that page string, and every span
/// overlapping a match is marked. A span touched by several clauses keeps the
/// mark of the first clause in response order.
pub fn highlight_text_layer(
    span_texts: &[&str],
    clauses: &[ClauseDescriptor],
    config: &HighlightConfig,
) -> Vec<Option<SpanMark>> {
    let mut page = String::new();
    let mut ranges = Vec::with_capacity(span_texts.len());
    let mut page_chars = 0;
    for text in span_texts {
        let canonical = canonicalize(text);
        let len = canonical.chars().count();
        ranges.push((page_chars, page_chars + len));
        page_chars += len;
        page.push_str(&canonical);
    }

    let report = locate_clauses(&page, clauses, config);
    let mut marks: Vec<Option<SpanMark>> = vec![None; span_texts.len()];

    for m in &report.matches {
        for (span_idx, (start, end)) in ranges.iter().enumerate() {
            if start == end || *end <= m.normalized_start || *start >= m.normalized_end {
                continue;
            }
            if marks[span_idx].is_none() {
                marks[span_idx] = Some(SpanMark {
                    risk_tier: m.risk_tier,
                    clause_index: m.clause_index,
                });
            }
        }
    }

    marks
}
