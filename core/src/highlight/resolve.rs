use crate::highlight::model::{CanonicalSegment, MatchInterval};
use tracing::debug;

/// Turn raw matches into a non-overlapping partition of `[0, doc_len)` in
/// canonical space.
///
/// Matches are ordered by start; at equal starts the clause listed first in
/// the analyzer response goes first. Once characters are claimed by a
/// highlight, a later match that starts inside the claimed region is dropped
/// whole. Empty segments are never emitted, so an empty document yields an
/// empty partition.
pub fn resolve_intervals(doc_len: usize, matches: &[MatchInterval]) -> Vec<CanonicalSegment> {
    let mut ordered: Vec<MatchInterval> = matches.to_vec();
    ordered.sort_by_key(|m| (m.normalized_start, m.clause_index));

    let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0;

    for m in ordered {
        if m.normalized_start >= m.normalized_end || m.normalized_end > doc_len {
            debug!(
                clause_index = m.clause_index,
                start = m.normalized_start,
                end = m.normalized_end,
                doc_len,
                "ignoring out-of-range match"
            );
            continue;
        }
        if m.normalized_start < cursor {
            debug!(
                clause_index = m.clause_index,
                start = m.normalized_start,
                claimed_until = cursor,
                "dropping match overlapping an earlier highlight"
            );
            continue;
        }
        if cursor < m.normalized_start {
            segments.push(CanonicalSegment::plain(cursor, m.normalized_start));
        }
        segments.push(CanonicalSegment {
            start: m.normalized_start,
            end: m.normalized_end,
            risk_tier: Some(m.risk_tier),
            clause_index: Some(m.clause_index),
        });
        cursor = m.normalized_end;
    }

    if cursor < doc_len {
        segments.push(CanonicalSegment::plain(cursor, doc_len));
    }

    segments
}
