use crate::highlight::locate::search_target;
use crate::highlight::normalize::canonicalize;
use sha2::{Digest, Sha256};

/// Stable clause anchor: `clause_<16 hex>` over the canonical search target,
/// so the same quote with different spacing or label prefix maps to the same id.
pub fn clause_anchor(clause_text: &str, separator: char) -> String {
    let canonical = canonicalize(search_target(clause_text, separator));
    let digest = sha256_hex(canonical.as_bytes());
    format!("clause_{}", &digest[..16])
}

/// SHA-256 of the (masked) document text, for cache keys on the presentation side.
pub fn document_fingerprint(text: &str) -> String {
    sha256_hex(text.as_bytes())
}

/// SHA-256 hash of bytes as hex string (deterministic)
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
