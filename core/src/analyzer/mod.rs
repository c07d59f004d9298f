//! Boundary with the external clause analyzer: what goes out (masked
//! submissions) and what comes back (validated clause descriptors).

pub mod client;
pub mod response;
pub mod submission;

pub use client::{run_analysis, AnalysisOutcome, ClauseAnalyzer};
pub use response::{
    extract_json_payload, parse_analysis_report, parse_clause_descriptors, AnalysisReport,
    ReportRisk,
};
pub use submission::{prepare_submission, AnalyzerSubmission, DEFAULT_DOCUMENT_LABEL};
