use crate::highlight::locate::ClauseOutcome;
use crate::highlight::model::{ClauseDescriptor, RiskTier};
use serde::{Deserialize, Serialize};

/// Side-list entry for one analyzer clause, annotated with where (and whether)
/// it was found in the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClauseCard {
    pub clause_index: usize,
    pub anchor: String,
    pub descriptor: ClauseDescriptor,
    pub outcome: ClauseOutcome,
    pub matched: bool,
}

impl ClauseCard {
    /// Key clauses are the ones a reader must not miss.
    pub fn is_key_clause(&self) -> bool {
        matches!(
            self.descriptor.risk_tier,
            Some(RiskTier::Red) | Some(RiskTier::Orange)
        )
    }

    pub fn occurrences(&self) -> usize {
        self.outcome.occurrences()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierCounts {
    pub red: usize,
    pub orange: usize,
    pub yellow: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.red + self.orange + self.yellow
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverallRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardOrder {
    /// Analyzer rank first, then response order. Unranked cards go last.
    #[default]
    Default,
    HighRisk,
    LowRisk,
}

pub fn tier_counts(cards: &[ClauseCard]) -> TierCounts {
    let mut counts = TierCounts::default();
    for card in cards {
        match card.descriptor.risk_tier {
            Some(RiskTier::Red) => counts.red += 1,
            Some(RiskTier::Orange) => counts.orange += 1,
            Some(RiskTier::Yellow) => counts.yellow += 1,
            None => {}
        }
    }
    counts
}

pub fn overall_risk(cards: &[ClauseCard]) -> OverallRisk {
    let counts = tier_counts(cards);
    if counts.red > 0 {
        OverallRisk::High
    } else if counts.orange > 0 {
        OverallRisk::Medium
    } else {
        OverallRisk::Low
    }
}

/// `tier = None` keeps every tier; `key_only` keeps RED and ORANGE cards.
pub fn filter_cards(cards: &[ClauseCard], tier: Option<RiskTier>, key_only: bool) -> Vec<&ClauseCard> {
    cards
        .iter()
        .filter(|c| !key_only || c.is_key_clause())
        .filter(|c| tier.is_none() || c.descriptor.risk_tier == tier)
        .collect()
}

/// Stable sort; cards with an unrecognized tier score 0.
pub fn sort_cards(cards: &mut [ClauseCard], order: CardOrder) {
    let score = |c: &ClauseCard| c.descriptor.risk_tier.map(|t| t.score()).unwrap_or(0);
    match order {
        CardOrder::Default => cards.sort_by_key(|c| {
            (
                c.descriptor.rank.is_none(),
                c.descriptor.rank.unwrap_or(u32::MAX),
                c.clause_index,
            )
        }),
        CardOrder::HighRisk => cards.sort_by(|a, b| score(b).cmp(&score(a))),
        CardOrder::LowRisk => cards.sort_by(|a, b| score(a).cmp(&score(b))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(idx: usize, risk: &str, rank: Option<u32>) -> ClauseCard {
        let mut descriptor = ClauseDescriptor::new(format!("조항 {}", idx), risk);
        descriptor.rank = rank;
        ClauseCard {
            clause_index: idx,
            anchor: format!("clause_{:016}", idx),
            descriptor,
            outcome: ClauseOutcome::NotFound,
            matched: false,
        }
    }

    #[test]
    fn test_counts_and_overall() {
        let cards = vec![card(0, "YELLOW", None), card(1, "ORANGE", None), card(2, "??", None)];
        let counts = tier_counts(&cards);
        assert_eq!(counts, TierCounts { red: 0, orange: 1, yellow: 1 });
        assert_eq!(counts.total(), 2);
        assert_eq!(overall_risk(&cards), OverallRisk::Medium);
        assert_eq!(overall_risk(&[]), OverallRisk::Low);
    }

    #[test]
    fn test_filter_key_only() {
        let cards = vec![card(0, "RED", None), card(1, "YELLOW", None), card(2, "ORANGE", None)];
        let key: Vec<usize> = filter_cards(&cards, None, true).iter().map(|c| c.clause_index).collect();
        assert_eq!(key, vec![0, 2]);
        let yellow = filter_cards(&cards, Some(RiskTier::Yellow), false);
        assert_eq!(yellow.len(), 1);
        assert!(filter_cards(&cards, Some(RiskTier::Yellow), true).is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let mut cards = vec![
            card(0, "YELLOW", Some(2)),
            card(1, "RED", None),
            card(2, "ORANGE", Some(1)),
            card(3, "RED", Some(3)),
        ];
        sort_cards(&mut cards, CardOrder::Default);
        let order: Vec<usize> = cards.iter().map(|c| c.clause_index).collect();
        assert_eq!(order, vec![2, 0, 3, 1]);

        sort_cards(&mut cards, CardOrder::HighRisk);
        let order: Vec<usize> = cards.iter().map(|c| c.clause_index).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);

        sort_cards(&mut cards, CardOrder::LowRisk);
        let order: Vec<usize> = cards.iter().map(|c| c.clause_index).collect();
        assert_eq!(order, vec![0, 2, 3, 1]);
    }
}
