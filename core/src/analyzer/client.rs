use crate::analyzer::response::parse_clause_descriptors;
use crate::analyzer::submission::{prepare_submission, AnalyzerSubmission};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::highlight::workflow::{build_highlight_view, HighlightView};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// External clause analyzer. Implementations receive masked text only and
/// return the raw response body.
pub trait ClauseAnalyzer {
    fn analyzer_id(&self) -> &str;
    fn analyze(&self, submission: &AnalyzerSubmission) -> CoreResult<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub analyzer_id: String,
    pub submission: AnalyzerSubmission,
    pub view: HighlightView,
}

/// mask -> analyze -> validate -> highlight, against the masked text.
pub fn run_analysis<A: ClauseAnalyzer>(
    analyzer: &A,
    raw_text: &str,
    label: &str,
    config: &CoreConfig,
) -> CoreResult<AnalysisOutcome> {
    config.highlight.validate()?;
    let submission = prepare_submission(raw_text, label, config.masking_profile)?;

    let response = analyzer.analyze(&submission).map_err(|e| {
        error!(analyzer = analyzer.analyzer_id(), error = %e, "analyzer call failed");
        e
    })?;
    let clauses = parse_clause_descriptors(&response)?;
    if clauses.is_empty() {
        return Err(CoreError::AnalyzerResponse(
            "analyzer returned no usable clauses".to_string(),
        ));
    }

    let view = build_highlight_view(&submission.masked_text, &clauses, &config.highlight)?;
    info!(
        analyzer = analyzer.analyzer_id(),
        document = %submission.document_sha256,
        clauses = clauses.len(),
        "analysis complete"
    );

    Ok(AnalysisOutcome {
        analyzer_id: analyzer.analyzer_id().to_string(),
        submission,
        view,
    })
}
