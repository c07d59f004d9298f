use clausemark_core::config::HighlightConfig;
use clausemark_core::highlight::cards::{filter_cards, sort_cards, CardOrder, OverallRisk};
use clausemark_core::highlight::export::{render_clause_map_csv, render_risk_memo_markdown};
use clausemark_core::highlight::model::{ClauseDescriptor, RiskTier};
use clausemark_core::highlight::workflow::build_highlight_view;
use pretty_assertions::assert_eq;

fn ranked(text: &str, label: &str, rank: u32, name: &str) -> ClauseDescriptor {
    let mut d = ClauseDescriptor::new(text, label);
    d.rank = Some(rank);
    d.display_name = Some(name.to_string());
    d
}

const TEXT: &str = "제2조 근로시간은 1일 12시간으로 한다.\n제3조 휴게시간은 따로 두지 않는다.\n제4조 연차는 회사가 지정한다.";

fn clauses() -> Vec<ClauseDescriptor> {
    vec![
        ranked("연차는 회사가 지정한다", "YELLOW", 3, "연차 지정"),
        ranked("근로시간은 1일 12시간으로 한다", "RED", 1, "근로시간"),
        ranked("휴게시간은 따로 두지 않는다", "ORANGE", 2, "휴게, 시간"),
    ]
}

#[test]
fn clause_map_csv_is_sorted_by_clause_index() {
    let mut view = build_highlight_view(TEXT, &clauses(), &HighlightConfig::default()).unwrap();
    sort_cards(&mut view.cards, CardOrder::HighRisk);
    let csv = render_clause_map_csv(&view.cards).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("0,clause_"));
    assert!(lines[1].ends_with(",YELLOW,연차 지정,true,1"));
    assert!(lines[3].ends_with(",ORANGE,\"휴게, 시간\",true,1"));
    assert!(!csv.contains('\r'));
}

#[test]
fn card_orders_and_filters() {
    let view = build_highlight_view(TEXT, &clauses(), &HighlightConfig::default()).unwrap();
    assert_eq!(view.overall_risk, OverallRisk::High);
    assert_eq!(view.tier_counts.total(), 3);

    let mut cards = view.cards.clone();
    sort_cards(&mut cards, CardOrder::Default);
    assert_eq!(cards.iter().map(|c| c.clause_index).collect::<Vec<_>>(), vec![1, 2, 0]);
    sort_cards(&mut cards, CardOrder::LowRisk);
    assert_eq!(cards[0].descriptor.risk_tier, Some(RiskTier::Yellow));

    let key = filter_cards(&view.cards, None, true);
    assert_eq!(key.len(), 2);
    let orange = filter_cards(&view.cards, Some(RiskTier::Orange), false);
    assert_eq!(orange.len(), 1);
    assert_eq!(orange[0].clause_index, 2);
}

#[test]
fn memo_reports_counts() {
    let view = build_highlight_view(TEXT, &clauses(), &HighlightConfig::default()).unwrap();
    let memo = render_risk_memo_markdown(&view);
    assert!(memo.starts_with("# Contract Risk Memo\n"));
    assert!(memo.contains("- Clauses: 1 RED, 1 ORANGE, 1 YELLOW"));
    assert!(memo.contains("| 2 | RED | 근로시간 | yes (1) |"));
}
