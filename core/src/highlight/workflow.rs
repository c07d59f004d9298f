use crate::config::HighlightConfig;
use crate::error::CoreResult;
use crate::highlight::anchors::{clause_anchor, document_fingerprint};
use crate::highlight::cards::{
    filter_cards, overall_risk, sort_cards, tier_counts, CardOrder, ClauseCard, OverallRisk,
    TierCounts,
};
use crate::highlight::locate::{locate_clauses, LocatorReport};
use crate::highlight::model::{ClauseDescriptor, ResolvedSegment, RiskTier};
use crate::highlight::normalize::normalize;
use crate::highlight::render::render_segments;
use crate::highlight::resolve::resolve_intervals;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One rendered span, with its text copied out for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightSegment {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub risk_tier: Option<RiskTier>,
    pub clause_index: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightView {
    pub document_sha256: String,
    pub segments: Vec<HighlightSegment>,
    pub cards: Vec<ClauseCard>,
    pub unmatched_clause_indices: Vec<usize>,
    pub tier_counts: TierCounts,
    pub overall_risk: OverallRisk,
}

impl HighlightView {
    /// Cards for a filtered listing. The view itself, including its counts
    /// and overall risk, always covers every clause.
    pub fn select_cards(
        &self,
        tier: Option<RiskTier>,
        key_only: bool,
        order: CardOrder,
    ) -> Vec<ClauseCard> {
        let mut cards: Vec<ClauseCard> = filter_cards(&self.cards, tier, key_only)
            .into_iter()
            .cloned()
            .collect();
        sort_cards(&mut cards, order);
        cards
    }
}

/// normalize -> locate -> resolve -> render, returning original-space segments.
pub fn highlight_document(
    text: &str,
    clauses: &[ClauseDescriptor],
    config: &HighlightConfig,
) -> CoreResult<(Vec<ResolvedSegment>, LocatorReport)> {
    let normalized = normalize(text);
    let report = locate_clauses(&normalized.canonical, clauses, config);
    let canonical_segments = resolve_intervals(normalized.len(), &report.matches);
    let segments = render_segments(text, &normalized.index_map, &canonical_segments)?;
    Ok((segments, report))
}

/// Everything the analysis page needs for one masked document.
pub fn build_highlight_view(
    masked_text: &str,
    clauses: &[ClauseDescriptor],
    config: &HighlightConfig,
) -> CoreResult<HighlightView> {
    let (segments, report) = highlight_document(masked_text, clauses, config)?;

    let cards: Vec<ClauseCard> = clauses
        .iter()
        .zip(report.outcomes.iter())
        .enumerate()
        .map(|(clause_index, (descriptor, outcome))| ClauseCard {
            clause_index,
            anchor: clause_anchor(&descriptor.clause_text, config.label_separator),
            descriptor: descriptor.clone(),
            outcome: *outcome,
            matched: outcome.is_matched(),
        })
        .collect();

    let unmatched_clause_indices = report.unmatched_clause_indices();
    let counts = tier_counts(&cards);
    let risk = overall_risk(&cards);

    info!(
        clauses = clauses.len(),
        highlighted = segments.iter().filter(|s| s.is_highlighted()).count(),
        unmatched = unmatched_clause_indices.len(),
        "highlight view built"
    );

    Ok(HighlightView {
        document_sha256: document_fingerprint(masked_text),
        segments: segments
            .iter()
            .map(|s| HighlightSegment {
                start: s.original_start,
                end: s.original_end,
                text: s.text(masked_text).to_string(),
                risk_tier: s.risk_tier,
                clause_index: s.clause_index,
            })
            .collect(),
        cards,
        unmatched_clause_indices,
        tier_counts: counts,
        overall_risk: risk,
    })
}
