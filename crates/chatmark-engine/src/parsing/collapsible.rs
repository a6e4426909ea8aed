//! # Collapsible Extraction
//!
//! Pre-pass that lifts `<details>` regions out of the content before block
//! segmentation. Each region is replaced by a placeholder line and its body is
//! fed back through the whole pipeline, so nested regions come out as nested
//! [`ContentBlock::Collapsible`] values without any depth special-casing.
//!
//! ## Region Shape
//!
//! ```text
//! <details[ open]>
//! <summary>SUMMARY</summary>
//! BODY
//! </details>
//! ```
//!
//! Opening and closing tags are paired by depth. Only outermost regions are
//! replaced here; regions inside a body are handled by the recursive parse of
//! that body. A region needs a complete `<summary>…</summary>` ahead of any
//! nested tag; text before the summary is dropped. A region without one is
//! left as literal text.
//!
//! Content at or above the configured character limit is returned untouched.
//! Regions nested deeper than [`MAX_DEPTH`] stay literal inside the body of
//! the deepest collapsible.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::blocks::ContentBlock;

/// Collapsible nesting depth at which extraction stops.
pub const MAX_DEPTH: usize = 64;

/// The placeholder line standing in for an extracted region.
pub struct Placeholder;

impl Placeholder {
    /// Private-use delimiters keep the token out of anything a model writes.
    const DELIM: char = '\u{E000}';
    const TAG: &'static str = "chatmark:collapsible:";

    pub fn token(index: usize) -> String {
        format!("{d}{}{index}{d}", Self::TAG, d = Self::DELIM)
    }

    /// Returns the emission index if `line` is exactly one placeholder.
    pub fn parse(line: &str) -> Option<usize> {
        line.trim()
            .strip_prefix(Self::DELIM)?
            .strip_suffix(Self::DELIM)?
            .strip_prefix(Self::TAG)?
            .parse()
            .ok()
    }
}

/// Content with its collapsible regions swapped out for placeholders.
#[derive(Debug)]
pub struct Extraction {
    pub text: String,
    /// Indexed by the number carried in each placeholder.
    pub collapsibles: Vec<ContentBlock>,
}

impl Extraction {
    pub fn unchanged(content: &str) -> Self {
        Self {
            text: content.to_string(),
            collapsibles: vec![],
        }
    }
}

/// One paired (or, when streaming, tail-terminated) `<details>` region.
#[derive(Debug, Clone)]
struct Region {
    /// From the `<` of the opening tag to the end of the closing tag.
    outer: Range<usize>,
    /// Between the two tags.
    body: Range<usize>,
    is_open: bool,
}

/// Extracts outermost collapsible regions from `content`.
///
/// `parse_inner` is invoked once per region with the trimmed body text and
/// must return that body's block list.
pub fn extract<F>(content: &str, is_streaming: bool, limit: usize, parse_inner: F) -> Extraction
where
    F: Fn(&str) -> Vec<ContentBlock>,
{
    if content.chars().count() >= limit {
        log::debug!(
            "content exceeds {limit} characters, skipping collapsible extraction"
        );
        return Extraction::unchanged(content);
    }

    let regions = outermost_regions(content, is_streaming);
    if regions.is_empty() {
        return Extraction::unchanged(content);
    }

    // Build blocks in source order so placeholder indices follow emission order.
    let mut prepared = Vec::with_capacity(regions.len());
    for region in regions {
        let Some((summary, inner)) = split_summary(&content[region.body.clone()]) else {
            continue;
        };
        let block = ContentBlock::Collapsible {
            summary,
            nested: parse_inner(inner.trim()),
            is_open: region.is_open,
        };
        prepared.push((region.outer, block));
    }

    let mut text = content.to_string();
    // Replace back to front so earlier offsets stay valid.
    for (index, (outer, _)) in prepared.iter().enumerate().rev() {
        text.replace_range(outer.clone(), &format!("\n{}\n", Placeholder::token(index)));
    }
    let collapsibles: Vec<_> = prepared.into_iter().map(|(_, block)| block).collect();

    log::trace!("extracted {} collapsible region(s)", collapsibles.len());
    Extraction { text, collapsibles }
}

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| {
        Regex::new(r"(?i)<details(\s+open)?\s*>|</details\s*>").expect("Invalid details tag regex")
    })
}

fn summary_regex() -> &'static Regex {
    static SUMMARY_REGEX: OnceLock<Regex> = OnceLock::new();
    SUMMARY_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<summary>(.*?)</summary>").expect("Invalid summary regex")
    })
}

/// Splits a region body into its decoded summary and the remaining text.
///
/// A summary that follows a nested `<details>` tag belongs to that region.
fn split_summary(body: &str) -> Option<(String, &str)> {
    let caps = summary_regex().captures(body)?;
    let whole = caps.get(0)?;
    if tag_regex().is_match(&body[..whole.start()]) {
        return None;
    }
    let summary = caps.get(1)?.as_str().trim();
    let summary = html_escape::decode_html_entities(summary).into_owned();
    Some((summary, &body[whole.end()..]))
}

/// Pairs tags by depth and keeps the regions that a body parse will not see.
///
/// A region without a valid summary is skipped, which lets the regions
/// nested inside it be picked up at this level instead.
fn outermost_regions(content: &str, is_streaming: bool) -> Vec<Region> {
    let mut stack: Vec<(usize, usize, bool)> = vec![];
    let mut paired: Vec<Region> = vec![];

    for m in tag_regex().captures_iter(content) {
        let Some(whole) = m.get(0) else { continue };
        if whole.as_str().starts_with("</") {
            // Stray closing tags without an opener are literal text.
            if let Some((start, body_start, is_open)) = stack.pop() {
                paired.push(Region {
                    outer: start..whole.end(),
                    body: body_start..whole.start(),
                    is_open,
                });
            }
        } else {
            stack.push((whole.start(), whole.end(), m.get(1).is_some()));
        }
    }

    if is_streaming {
        // The bottom of the stack is the outermost region still being written.
        if let Some(&(start, body_start, is_open)) = stack.first() {
            paired.push(Region {
                outer: start..content.len(),
                body: body_start..content.len(),
                is_open,
            });
        }
    }

    paired.sort_by_key(|r| r.outer.start);

    let mut selected: Vec<Region> = vec![];
    let mut covered_until = 0;
    for region in paired {
        if region.outer.start < covered_until {
            continue;
        }
        if split_summary(&content[region.body.clone()]).is_none() {
            continue;
        }
        covered_until = region.outer.end;
        selected.push(region);
    }
    selected
}
