use crate::highlight::model::NormalizedText;

/// Fold one char into canonical form. Whitespace disappears.
///
/// Case folding is kept one-to-one: a char whose lowercase form expands to
/// several chars (e.g. 'İ') is kept as is, so every canonical char has exactly
/// one source char and the index map stays strictly increasing. Hangul and
/// other caseless scripts pass through unchanged.
pub fn fold_char(ch: char) -> Option<char> {
    if ch.is_whitespace() {
        return None;
    }
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => Some(single),
        _ => Some(ch),
    }
}

/// Single left-to-right pass producing the canonical text and its index map.
pub fn normalize(text: &str) -> NormalizedText {
    let mut canonical = String::with_capacity(text.len());
    let mut index_map = Vec::with_capacity(text.len());

    for (offset, ch) in text.char_indices() {
        if let Some(folded) = fold_char(ch) {
            canonical.push(folded);
            index_map.push(offset);
        }
    }

    NormalizedText {
        canonical,
        index_map,
        source_len: text.len(),
    }
}

/// Canonical form without the index map, for search targets.
pub fn canonicalize(text: &str) -> String {
    text.chars().filter_map(fold_char).collect()
}
