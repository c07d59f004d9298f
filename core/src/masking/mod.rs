//! PII masking applied before contract text leaves the process.
//!
//! Detection is regex based and tuned for Korean contracts (resident numbers,
//! phone numbers, labeled names and addresses). It is best effort, not a
//! security boundary: identifiers in unusual formats are not guaranteed to be
//! caught.

pub mod patterns;
pub mod redaction;
pub mod sanitize;

pub use redaction::{mask, MaskedText, MaskingEngine, MaskingProfile, MaskingRecord, PiiCategory};
pub use sanitize::{sanitize_extracted_text, SanitizedContractText};
