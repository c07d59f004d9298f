use crate::error::{CoreError, CoreResult};
use crate::highlight::model::{CanonicalSegment, ResolvedSegment};

/// Translate a canonical-space partition back onto the original text.
///
/// Highlight boundaries come from the index map: the start is the source
/// offset of the first canonical char, the end is just past the source char
/// of the last one. Plain segments absorb everything in between, including
/// the whitespace that normalization removed, so concatenating the output
/// reproduces `original` byte for byte.
///
/// Errors only when `index_map` does not belong to `original` (not strictly
/// increasing, or off a char start) or the segments are not an ordered
/// partition; both are caller bugs.
pub fn render_segments(
    original: &str,
    index_map: &[usize],
    segments: &[CanonicalSegment],
) -> CoreResult<Vec<ResolvedSegment>> {
    let canonical_len = index_map.len();
    if let Some(pair) = index_map.windows(2).find(|w| w[0] >= w[1]) {
        return Err(CoreError::IndexMapMismatch(format!(
            "index map is not strictly increasing ({} then {})",
            pair[0], pair[1]
        )));
    }
    let mut out = Vec::with_capacity(segments.len() + 1);
    let mut cursor = 0;
    let mut canonical_cursor = 0;

    for seg in segments {
        if seg.start < canonical_cursor || seg.end < seg.start || seg.end > canonical_len {
            return Err(CoreError::InvalidInput(format!(
                "segment {}..{} is not an ordered partition of canonical length {}",
                seg.start, seg.end, canonical_len
            )));
        }
        canonical_cursor = seg.end;
        if seg.start == seg.end {
            continue;
        }

        if seg.is_highlighted() {
            let start = source_offset(original, index_map, seg.start)?;
            let end = source_char_end(original, index_map[seg.end - 1])?;
            if start > cursor {
                out.push(plain(cursor, start));
            }
            out.push(ResolvedSegment {
                original_start: start,
                original_end: end,
                risk_tier: seg.risk_tier,
                clause_index: seg.clause_index,
            });
            cursor = end;
        } else {
            let end = if seg.end == canonical_len {
                original.len()
            } else {
                source_offset(original, index_map, seg.end)?
            };
            if end > cursor {
                out.push(plain(cursor, end));
                cursor = end;
            }
        }
    }

    if cursor < original.len() {
        out.push(plain(cursor, original.len()));
    }

    Ok(out)
}

fn plain(start: usize, end: usize) -> ResolvedSegment {
    ResolvedSegment {
        original_start: start,
        original_end: end,
        risk_tier: None,
        clause_index: None,
    }
}

fn source_offset(original: &str, index_map: &[usize], canonical_idx: usize) -> CoreResult<usize> {
    let offset = index_map[canonical_idx];
    if original.is_char_boundary(offset) && offset < original.len() {
        Ok(offset)
    } else {
        Err(CoreError::IndexMapMismatch(format!(
            "offset {} is not a char start in a text of {} bytes",
            offset,
            original.len()
        )))
    }
}

fn source_char_end(original: &str, offset: usize) -> CoreResult<usize> {
    original
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map(|ch| offset + ch.len_utf8())
        .ok_or_else(|| {
            CoreError::IndexMapMismatch(format!(
                "offset {} is not a char start in a text of {} bytes",
                offset,
                original.len()
            ))
        })
}
