use crate::error::{CoreError, CoreResult};
use crate::highlight::anchors::document_fingerprint;
use crate::masking::{sanitize_extracted_text, MaskingEngine, MaskingProfile, MaskingRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_DOCUMENT_LABEL: &str = "업로드한 계약서";

/// What actually leaves the process. Holds only masked text; the masking
/// records carry offsets and categories, never the values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzerSubmission {
    pub label: String,
    pub document_sha256: String,
    pub masking_profile: MaskingProfile,
    pub masked_text: String,
    pub masking_records: Vec<MaskingRecord>,
}

/// Sanitize extracted text, mask it and package it for the analyzer.
/// `document_sha256` fingerprints the masked text, which is also the text
/// the highlighter later runs on.
pub fn prepare_submission(
    raw_text: &str,
    label: &str,
    profile: MaskingProfile,
) -> CoreResult<AnalyzerSubmission> {
    let sanitized = sanitize_extracted_text(raw_text);
    if sanitized.content.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "contract text is empty".to_string(),
        ));
    }

    let masked = MaskingEngine::new(profile).mask(&sanitized.content);
    let label = match label.trim() {
        "" => DEFAULT_DOCUMENT_LABEL.to_string(),
        l => l.to_string(),
    };

    info!(
        profile = ?profile,
        masked = masked.records.len(),
        chars = masked.text.chars().count(),
        "analyzer submission prepared"
    );

    Ok(AnalyzerSubmission {
        label,
        document_sha256: document_fingerprint(&masked.text),
        masking_profile: profile,
        masked_text: masked.text,
        masking_records: masked.records,
    })
}
