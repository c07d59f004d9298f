use serde::{Deserialize, Serialize};

/// Severity assigned to a clause by the external analyzer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Red,
    Orange,
    Yellow,
}

const TIER_KEYWORDS: &[(&str, RiskTier)] = &[
    ("RED", RiskTier::Red),
    ("ORANGE", RiskTier::Orange),
    ("YELLOW", RiskTier::Yellow),
];

impl RiskTier {
    /// Map an untrusted analyzer label onto a tier.
    ///
    /// Case-insensitive substring match, checked RED, ORANGE, YELLOW in that
    /// order ("🔴 RED", "red-flag", "Orange" all resolve). Anything else is
    /// `None`: the clause is listed but never highlighted.
    pub fn from_label(label: &str) -> Option<Self> {
        let upper = label.to_uppercase();
        TIER_KEYWORDS
            .iter()
            .find(|(keyword, _)| upper.contains(keyword))
            .map(|(_, tier)| *tier)
    }

    /// Legacy report severity (`high|medium|low`).
    pub fn from_severity(severity: &str) -> Option<Self> {
        match severity.trim().to_lowercase().as_str() {
            "high" => Some(RiskTier::Red),
            "medium" => Some(RiskTier::Orange),
            "low" => Some(RiskTier::Yellow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Red => "RED",
            RiskTier::Orange => "ORANGE",
            RiskTier::Yellow => "YELLOW",
        }
    }

    /// Ordering weight for "highest risk first" listings.
    pub fn score(&self) -> u8 {
        match self {
            RiskTier::Red => 3,
            RiskTier::Orange => 2,
            RiskTier::Yellow => 1,
        }
    }
}

/// One risk-flagged excerpt as returned by the analyzer, after boundary
/// validation. `clause_text` is still untrusted: it may carry a
/// `"label: quoted text"` prefix and whitespace that differs from the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseDescriptor {
    pub clause_text: String,
    pub risk_label: String,
    pub risk_tier: Option<RiskTier>,
    pub display_name: Option<String>,
    pub explanation: Option<String>,
    pub summary_points: Vec<String>,
    pub rank: Option<u32>,
}

impl ClauseDescriptor {
    pub fn new(clause_text: impl Into<String>, risk_label: impl Into<String>) -> Self {
        let risk_label = risk_label.into();
        Self {
            clause_text: clause_text.into(),
            risk_tier: RiskTier::from_label(&risk_label),
            risk_label,
            display_name: None,
            explanation: None,
            summary_points: Vec::new(),
            rank: None,
        }
    }
}

/// Canonical (whitespace-free, case-folded) form of a text plus, for every
/// canonical char, the byte offset in the source of the char it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub canonical: String,
    pub index_map: Vec<usize>,
    pub source_len: usize,
}

impl NormalizedText {
    /// Length of the canonical text in chars.
    pub fn len(&self) -> usize {
        self.index_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_map.is_empty()
    }
}

/// One occurrence of one clause, in canonical char indices (end exclusive).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchInterval {
    pub normalized_start: usize,
    pub normalized_end: usize,
    pub risk_tier: RiskTier,
    pub clause_index: usize,
}

/// Partition piece in canonical char indices, produced by the resolver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalSegment {
    pub start: usize,
    pub end: usize,
    pub risk_tier: Option<RiskTier>,
    pub clause_index: Option<usize>,
}

impl CanonicalSegment {
    pub fn plain(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            risk_tier: None,
            clause_index: None,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.risk_tier.is_some()
    }
}

/// Partition piece in original-text byte offsets (always on char boundaries).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedSegment {
    pub original_start: usize,
    pub original_end: usize,
    pub risk_tier: Option<RiskTier>,
    pub clause_index: Option<usize>,
}

impl ResolvedSegment {
    pub fn text<'a>(&self, original: &'a str) -> &'a str {
        &original[self.original_start..self.original_end]
    }

    pub fn is_highlighted(&self) -> bool {
        self.risk_tier.is_some()
    }
}
