use crate::config::HighlightConfig;
use crate::highlight::model::{ClauseDescriptor, MatchInterval, RiskTier};
use crate::highlight::normalize::canonicalize;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What happened to one clause during location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseOutcome {
    Matched { occurrences: usize },
    NotFound,
    TooShort { canonical_chars: usize },
    UnrecognizedTier,
    EmptyText,
}

impl ClauseOutcome {
    pub fn occurrences(&self) -> usize {
        match self {
            ClauseOutcome::Matched { occurrences } => *occurrences,
            _ => 0,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.occurrences() > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorReport {
    /// Intervals in clause order, then document order within a clause.
    pub matches: Vec<MatchInterval>,
    /// One outcome per input clause, same indexing as the input list.
    pub outcomes: Vec<ClauseOutcome>,
}

impl LocatorReport {
    pub fn unmatched_clause_indices(&self) -> Vec<usize> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_matched())
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// The literal to search for: everything after the first label separator,
/// trimmed ("임금: 월급은 70%만 지급한다" -> "월급은 70%만 지급한다").
pub fn search_target(clause_text: &str, separator: char) -> &str {
    match clause_text.split_once(separator) {
        Some((_, rest)) => rest.trim(),
        None => clause_text.trim(),
    }
}

/// Every non-overlapping occurrence of `target` in `canonical_doc`, scanning
/// left to right and resuming just past each hit. Returned as canonical char
/// ranges.
pub fn find_occurrences(canonical_doc: &str, target: &str) -> Vec<(usize, usize)> {
    if target.is_empty() {
        return Vec::new();
    }
    let target_chars = target.chars().count();
    let mut out = Vec::new();
    let mut byte_cursor = 0;
    let mut char_cursor = 0;
    for (byte_pos, _) in canonical_doc.match_indices(target) {
        char_cursor += canonical_doc[byte_cursor..byte_pos].chars().count();
        byte_cursor = byte_pos;
        out.push((char_cursor, char_cursor + target_chars));
    }
    out
}

/// Locate every clause in the canonical document.
pub fn locate_clauses(
    canonical_doc: &str,
    clauses: &[ClauseDescriptor],
    config: &HighlightConfig,
) -> LocatorReport {
    let mut report = LocatorReport::default();

    for (clause_index, clause) in clauses.iter().enumerate() {
        let outcome = locate_one(canonical_doc, clause_index, clause, config, &mut report.matches);
        match outcome {
            ClauseOutcome::Matched { occurrences } => {
                debug!(clause_index, occurrences, "clause located");
            }
            ClauseOutcome::NotFound => {
                warn!(clause_index, "clause text not found in document");
            }
            other => {
                debug!(clause_index, outcome = ?other, "clause skipped");
            }
        }
        report.outcomes.push(outcome);
    }

    report
}

fn locate_one(
    canonical_doc: &str,
    clause_index: usize,
    clause: &ClauseDescriptor,
    config: &HighlightConfig,
    matches: &mut Vec<MatchInterval>,
) -> ClauseOutcome {
    let literal = search_target(&clause.clause_text, config.label_separator);
    let target = canonicalize(literal);
    if target.is_empty() {
        return ClauseOutcome::EmptyText;
    }

    let canonical_chars = target.chars().count();
    if canonical_chars < config.min_target_chars {
        return ClauseOutcome::TooShort { canonical_chars };
    }

    let risk_tier: RiskTier = match clause.risk_tier {
        Some(tier) => tier,
        None => return ClauseOutcome::UnrecognizedTier,
    };

    let hits = find_occurrences(canonical_doc, &target);
    if hits.is_empty() {
        return ClauseOutcome::NotFound;
    }

    let occurrences = hits.len();
    matches.extend(hits.into_iter().map(|(start, end)| MatchInterval {
        normalized_start: start,
        normalized_end: end,
        risk_tier,
        clause_index,
    }));
    ClauseOutcome::Matched { occurrences }
}
