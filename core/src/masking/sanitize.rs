#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContractText {
    pub content: String,
}

/// Enforce the extraction contract on text handed over by the PDF/TXT reader:
/// CRLF and lone CR become LF, and every control char except `\n` and `\t` is
/// dropped (NUL bytes from broken PDFs break downstream renderers).
pub fn sanitize_extracted_text(raw: &str) -> SanitizedContractText {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let content = unified
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    SanitizedContractText { content }
}
