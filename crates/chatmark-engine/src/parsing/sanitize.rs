//! # Streaming Sanitizer
//!
//! Pre-pass that neutralizes markup a model has opened but not yet closed, so
//! half-written emphasis and links never show up as stray markers.
//!
//! - `**` and `__`: when the count is odd, the last occurrence is removed.
//! - `*` and `_` are left alone; the ambiguity with literal punctuation is
//!   not resolved here and the inline decoder degrades on its own.
//! - `[text](url` with no closing `)` gets its `[` escaped to `\[`.
//!
//! Fenced code bodies are skipped: `**kwargs` inside a fence is code, not an
//! unfinished bold run. Rule lines (`***`, `___`) are skipped too.

use std::ops::Range;

use super::blocks::kinds::{CodeFence, HorizontalRule};

/// Paired emphasis markers, checked in this order.
pub const PAIRED_MARKERS: [&str; 2] = ["**", "__"];

/// Returns `content` with dangling paired markers and unclosed links defused.
pub fn sanitize(content: &str) -> String {
    let mut text = content.to_string();
    for marker in PAIRED_MARKERS {
        drop_unpaired(&mut text, marker);
    }
    escape_unclosed_links(&mut text);
    text
}

/// Byte ranges of prose. Fenced code (fence lines included) and horizontal
/// rule lines such as `***` or `___` are left out.
fn prose_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = vec![];
    let mut in_code = false;
    let mut prose_start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let end = offset + line.len();
        if CodeFence::sig(line).is_some() {
            if in_code {
                prose_start = end;
            } else if offset > prose_start {
                ranges.push(prose_start..offset);
            }
            in_code = !in_code;
        } else if !in_code && HorizontalRule::matches(line) {
            if offset > prose_start {
                ranges.push(prose_start..offset);
            }
            prose_start = end;
        }
        offset = end;
    }
    if !in_code && text.len() > prose_start {
        ranges.push(prose_start..text.len());
    }
    ranges
}

fn drop_unpaired(text: &mut String, marker: &str) {
    let ranges = prose_ranges(text);
    let count: usize = ranges
        .iter()
        .map(|r| text[r.clone()].matches(marker).count())
        .sum();
    if count % 2 == 0 {
        return;
    }
    let last = ranges
        .iter()
        .rev()
        .find_map(|r| text[r.clone()].rfind(marker).map(|i| r.start + i));
    if let Some(pos) = last {
        log::trace!("removing unpaired {marker:?} at byte {pos}");
        text.replace_range(pos..pos + marker.len(), "");
    }
}

fn escape_unclosed_links(text: &mut String) {
    let mut repairs = vec![];
    for range in prose_ranges(text) {
        find_unclosed_links(&text[range.clone()], range.start, &mut repairs);
    }
    // Insert from the back so earlier positions stay valid.
    for pos in repairs.into_iter().rev() {
        text.insert(pos, '\\');
    }
}

/// Pushes the absolute position of every `[` whose `](` destination never closes.
fn find_unclosed_links(s: &str, base: usize, repairs: &mut Vec<usize>) {
    let b = s.as_bytes();
    let mut opens = vec![];
    let mut i = 0;

    while i < b.len() {
        match b[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => opens.push(i),
            b']' => {
                if let Some(open) = opens.pop() {
                    if b.get(i + 1) == Some(&b'(') {
                        match closing_paren(b, i + 2) {
                            Ok(close) => i = close,
                            Err(stop) => {
                                repairs.push(base + open);
                                i = stop;
                                continue;
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }
}

/// Finds the `)` closing a link destination that starts at `from`.
///
/// Stops with `Err` at the first newline or at end of input.
fn closing_paren(b: &[u8], from: usize) -> Result<usize, usize> {
    let mut depth = 0usize;
    for (j, &c) in b.iter().enumerate().skip(from) {
        match c {
            b'(' => depth += 1,
            b')' if depth == 0 => return Ok(j),
            b')' => depth -= 1,
            b'\n' => return Err(j),
            _ => {}
        }
    }
    Err(b.len())
}
