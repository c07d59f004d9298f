use crate::error::{CoreError, CoreResult};
use crate::highlight::model::{ClauseDescriptor, RiskTier};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

// The analyzer has shipped two record shapes: English keys from the workflow
// endpoint and Korean keys from the PDF viewer prompt. Keys are tried in order.
const CLAUSE_KEYS: &[&str] = &["clause", "clauseText", "clause_text", "조항"];
const NAME_KEYS: &[&str] = &["name", "displayName", "title", "조항 제목"];
const NUMBER_KEYS: &[&str] = &["number", "조항 번호"];
const RISK_KEYS: &[&str] = &["risk", "riskTier", "risk_tier", "위험도 색상", "위험도"];
const EXPLANATION_KEYS: &[&str] = &["easyTranslation", "explanation", "설명"];
const SUMMARY_KEYS: &[&str] = &["summary", "summaryPoints", "요약"];
const RANK_KEYS: &[&str] = &["rank", "순위"];

/// Cut the JSON document out of a model answer that may wrap it in prose,
/// code fences or bracketed headings ("[분석 결과]").
///
/// Candidates are the object span (first `{` to last `}`) and the array span
/// (first `[` to last `]`). The earliest candidate that parses as JSON wins;
/// when neither parses, the earliest is returned so the caller reports the
/// parse error.
pub fn extract_json_payload(text: &str) -> CoreResult<&str> {
    let mut candidates: Vec<(usize, &str)> = [('{', '}'), ('[', ']')]
        .iter()
        .filter_map(|(open, close)| {
            let start = text.find(*open)?;
            let end = text.rfind(*close).filter(|end| *end > start)?;
            Some((start, &text[start..=end]))
        })
        .collect();
    candidates.sort_by_key(|(start, _)| *start);

    if let Some((_, payload)) = candidates
        .iter()
        .find(|(_, payload)| serde_json::from_str::<IgnoredAny>(payload).is_ok())
    {
        return Ok(*payload);
    }
    candidates
        .first()
        .map(|(_, payload)| *payload)
        .ok_or_else(|| CoreError::AnalyzerResponse("no JSON object in response".to_string()))
}

/// Validate an untrusted clause list into descriptors.
///
/// Accepts a bare array, an object with a `clauses` array, or a single record.
/// Records without clause text are dropped; unknown tiers are kept with
/// `risk_tier: None` so the clause still shows up in the list.
pub fn parse_clause_descriptors(response_text: &str) -> CoreResult<Vec<ClauseDescriptor>> {
    let payload = extract_json_payload(response_text)?;
    let value: Value = serde_json::from_str(payload)?;

    let records: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("clauses") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(CoreError::AnalyzerResponse(
                    "`clauses` is not an array".to_string(),
                ))
            }
            None if first_string(&obj, CLAUSE_KEYS).is_some() => vec![Value::Object(obj)],
            None => {
                return Err(CoreError::AnalyzerResponse(
                    "response has no clause list".to_string(),
                ))
            }
        },
        _ => {
            return Err(CoreError::AnalyzerResponse(
                "response is not an object or array".to_string(),
            ))
        }
    };

    let mut out = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let Some(obj) = record.as_object() else {
            warn!(record = idx, "skipping non-object clause record");
            continue;
        };
        match descriptor_from_record(obj) {
            Some(d) => out.push(d),
            None => warn!(record = idx, "skipping clause record without clause text"),
        }
    }
    Ok(out)
}

fn descriptor_from_record(obj: &Map<String, Value>) -> Option<ClauseDescriptor> {
    let clause_text = first_string(obj, CLAUSE_KEYS)?;
    let risk_label = first_string(obj, RISK_KEYS).unwrap_or_default();

    let display_name = match (first_string(obj, NUMBER_KEYS), first_string(obj, NAME_KEYS)) {
        (Some(number), Some(name)) => Some(format!("{} {}", number, name)),
        (number, name) => name.or(number),
    };

    Some(ClauseDescriptor {
        clause_text,
        risk_tier: RiskTier::from_label(&risk_label),
        risk_label,
        display_name,
        explanation: first_string(obj, EXPLANATION_KEYS),
        summary_points: first_value(obj, SUMMARY_KEYS)
            .map(summary_points)
            .unwrap_or_default(),
        rank: first_value(obj, RANK_KEYS).and_then(rank_value),
    })
}

fn first_value<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k)).filter(|v| !v.is_null())
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(scalar_string)
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn summary_points(v: &Value) -> Vec<String> {
    match v {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        Value::String(s) => s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn rank_value(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|r| u32::try_from(r).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRisk {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub recommendation: String,
}

/// Whole-contract report shape (title, level, summary, risk list).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub risks: Vec<ReportRisk>,
    #[serde(default)]
    pub legal_points: Vec<String>,
    #[serde(default)]
    pub overall_score: Option<f64>,
}

impl AnalysisReport {
    /// Risks as clause descriptors; severity high/medium/low maps to RED/ORANGE/YELLOW.
    pub fn to_clause_descriptors(&self) -> Vec<ClauseDescriptor> {
        self.risks
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.issue.trim().is_empty())
            .map(|(idx, r)| ClauseDescriptor {
                clause_text: r.issue.trim().to_string(),
                risk_label: r.severity.clone(),
                risk_tier: RiskTier::from_severity(&r.severity),
                display_name: Some(r.category.clone()).filter(|c| !c.trim().is_empty()),
                explanation: Some(r.recommendation.clone()).filter(|c| !c.trim().is_empty()),
                summary_points: if r.recommendation.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![r.recommendation.trim().to_string()]
                },
                rank: u32::try_from(idx + 1).ok(),
            })
            .collect()
    }
}

pub fn parse_analysis_report(response_text: &str) -> CoreResult<AnalysisReport> {
    let payload = extract_json_payload(response_text)?;
    let report: AnalysisReport = serde_json::from_str(payload)?;
    if report.title.trim().is_empty()
        || report.risk_level.trim().is_empty()
        || report.summary.trim().is_empty()
    {
        return Err(CoreError::AnalyzerResponse(
            "report is missing title, risk_level or summary".to_string(),
        ));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_code_fence() {
        let text = "분석 결과입니다.\n```json\n{\"clauses\": []}\n```\n감사합니다.";
        assert_eq!(extract_json_payload(text).unwrap(), "{\"clauses\": []}");
    }

    #[test]
    fn test_extract_array_payload() {
        assert_eq!(extract_json_payload("  [1, 2]  ").unwrap(), "[1, 2]");
        assert!(extract_json_payload("no json here").is_err());
        assert!(extract_json_payload("{ never closed").is_err());
    }

    #[test]
    fn test_bracketed_heading_before_object() {
        let text = "[분석 결과]\n```json\n{\"clauses\": [{\"clause\": \"휴게시간은 주지 않는다\", \"risk\": \"RED\"}]}\n```";
        assert!(extract_json_payload(text).unwrap().starts_with("{\"clauses\""));
        let clauses = parse_clause_descriptors(text).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].risk_tier, Some(RiskTier::Red));
    }

    #[test]
    fn test_bare_array_of_records_kept_whole() {
        let text = r#"결과: [{"clause": "연장근로는 무제한으로 한다", "risk": "RED"}, {"clause": "휴일은 회사가 정한다", "risk": "YELLOW"}]"#;
        assert_eq!(parse_clause_descriptors(text).unwrap().len(), 2);
    }

    #[test]
    fn test_english_shape() {
        let text = r#"[{"clause": "임금: 월급은 70%만 지급한다", "name": "수습 감액", "rank": 1,
            "risk": "RED", "easyTranslation": "최저임금 위반 소지", "summary": ["감액 한도 초과", "  "]}]"#;
        let clauses = parse_clause_descriptors(text).unwrap();
        assert_eq!(clauses.len(), 1);
        let c = &clauses[0];
        assert_eq!(c.risk_tier, Some(RiskTier::Red));
        assert_eq!(c.display_name.as_deref(), Some("수습 감액"));
        assert_eq!(c.rank, Some(1));
        assert_eq!(c.summary_points, vec!["감액 한도 초과".to_string()]);
    }

    #[test]
    fn test_korean_shape() {
        let text = r#"{"clauses": [{"조항 번호": "제7조", "조항 제목": "퇴직금", "조항": "퇴직금은 월급에 포함한다",
            "위험도 색상": "ORANGE", "설명": "퇴직금 분할 지급은 무효"}]}"#;
        let clauses = parse_clause_descriptors(text).unwrap();
        assert_eq!(clauses[0].display_name.as_deref(), Some("제7조 퇴직금"));
        assert_eq!(clauses[0].risk_tier, Some(RiskTier::Orange));
        assert_eq!(clauses[0].explanation.as_deref(), Some("퇴직금 분할 지급은 무효"));
    }

    #[test]
    fn test_untrusted_records_downgraded_not_rejected() {
        let text = r#"[{"clause": "휴게시간은 주지 않는다", "risk": "purple", "rank": "3"},
            {"name": "clause text missing"}, "garbage", {"clause": "  "}]"#;
        let clauses = parse_clause_descriptors(text).unwrap();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].risk_tier, None);
        assert_eq!(clauses[0].risk_label, "purple");
        assert_eq!(clauses[0].rank, Some(3));
    }

    #[test]
    fn test_non_list_rejected() {
        assert!(parse_clause_descriptors(r#"{"result": "ok"}"#).is_err());
        assert!(parse_clause_descriptors(r#"{"clauses": "none"}"#).is_err());
    }

    #[test]
    fn test_report_shape() {
        let text = r#"{"title": "근로계약서", "risk_level": "high", "summary": "위험 조항 다수",
            "risks": [{"category": "임금", "issue": "수습기간 임금 70% 지급", "severity": "high", "recommendation": "90% 이상 지급"},
                      {"category": "기타", "issue": "", "severity": "low", "recommendation": ""}],
            "legal_points": ["최저임금법 제5조"], "overall_score": 42}"#;
        let report = parse_analysis_report(text).unwrap();
        let clauses = report.to_clause_descriptors();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].risk_tier, Some(RiskTier::Red));
        assert_eq!(clauses[0].summary_points, vec!["90% 이상 지급".to_string()]);
        assert_eq!(report.overall_score, Some(42.0));
    }

    #[test]
    fn test_incomplete_report_rejected() {
        let result = parse_analysis_report(r#"{"title": "계약서", "risks": []}"#);
        assert!(matches!(result, Err(CoreError::AnalyzerResponse(_))));
    }
}
