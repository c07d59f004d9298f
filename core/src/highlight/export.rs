use crate::error::CoreResult;
use crate::highlight::cards::ClauseCard;
use crate::highlight::workflow::HighlightView;

pub fn render_clause_map_csv(cards: &[ClauseCard]) -> CoreResult<String> {
    let mut rows = cards.to_vec();
    rows.sort_by_key(|c| c.clause_index);

    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(&[
        "clause_index",
        "anchor",
        "risk_tier",
        "name",
        "matched",
        "occurrences",
    ])?;
    for card in rows {
        let occurrences = card.occurrences();
        wtr.write_record(&[
            card.clause_index.to_string(),
            card.anchor,
            card.descriptor
                .risk_tier
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| "NONE".to_string()),
            card.descriptor.display_name.unwrap_or_default(),
            card.matched.to_string(),
            occurrences.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

pub fn render_risk_memo_markdown(view: &HighlightView) -> String {
    let mut out = Vec::new();
    out.push("# Contract Risk Memo".to_string());
    out.push("".to_string());
    out.push(format!("- Document: `{}`", view.document_sha256));
    out.push(format!(
        "- Overall risk: {}",
        serde_json::to_value(view.overall_risk)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    ));
    out.push(format!(
        "- Clauses: {} RED, {} ORANGE, {} YELLOW",
        view.tier_counts.red, view.tier_counts.orange, view.tier_counts.yellow
    ));
    out.push("".to_string());
    out.push("| # | Tier | Clause | Found |".to_string());
    out.push("|---|---|---|---|".to_string());

    let mut cards: Vec<&ClauseCard> = view.cards.iter().collect();
    cards.sort_by(|a, b| {
        let sa = a.descriptor.risk_tier.map(|t| t.score()).unwrap_or(0);
        let sb = b.descriptor.risk_tier.map(|t| t.score()).unwrap_or(0);
        sb.cmp(&sa).then(a.clause_index.cmp(&b.clause_index))
    });
    for card in cards {
        let name = card
            .descriptor
            .display_name
            .clone()
            .unwrap_or_else(|| card.descriptor.clause_text.clone());
        out.push(format!(
            "| {} | {} | {} | {} |",
            card.clause_index + 1,
            card.descriptor.risk_tier.map(|t| t.as_str()).unwrap_or("NONE"),
            name.replace('|', "\\|").replace('\n', " "),
            if card.matched {
                format!("yes ({})", card.occurrences())
            } else {
                "no".to_string()
            }
        ));
    }
    out.push("".to_string());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;
    use crate::highlight::model::ClauseDescriptor;
    use crate::highlight::workflow::build_highlight_view;

    #[test]
    fn test_csv_header_and_rows() {
        let text = "수습기간 동안은 임금의 70%만 지급한다.";
        let mut first = ClauseDescriptor::new("수습기간 동안은 임금의 70%만", "RED");
        first.display_name = Some("수습 감액".to_string());
        let clauses = vec![first, ClauseDescriptor::new("없는 조항 문구입니다", "maybe")];
        let view = build_highlight_view(text, &clauses, &HighlightConfig::default()).unwrap();

        let csv = render_clause_map_csv(&view.cards).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "clause_index,anchor,risk_tier,name,matched,occurrences");
        assert!(lines[1].starts_with("0,clause_"));
        assert!(lines[1].ends_with(",RED,수습 감액,true,1"));
        assert!(lines[2].ends_with(",NONE,,false,0"));
    }

    #[test]
    fn test_memo_lists_highest_tier_first() {
        let text = "휴게시간은 없다. 연차는 회사가 정한다.";
        let clauses = vec![
            ClauseDescriptor::new("연차는 회사가 정한다", "YELLOW"),
            ClauseDescriptor::new("휴게시간은 없다", "RED"),
        ];
        let view = build_highlight_view(text, &clauses, &HighlightConfig::default()).unwrap();
        let memo = render_risk_memo_markdown(&view);
        let red_pos = memo.find("| 2 | RED |").unwrap();
        let yellow_pos = memo.find("| 1 | YELLOW |").unwrap();
        assert!(red_pos < yellow_pos);
        assert!(memo.contains("- Overall risk: high"));
    }
}
