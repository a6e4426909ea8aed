//! # Parsing Pipeline
//!
//! `content -> sanitize -> extract collapsibles -> segment lines -> blocks`
//!
//! Every stage is total: there is no input for which parsing fails. Content
//! that yields no blocks at all degrades to one paragraph holding the
//! sanitized text.

pub mod blocks;
pub mod collapsible;
pub mod inline;
pub mod probes;
pub mod sanitize;
pub mod snapshot;

use blocks::{BlockBuilder, ContentBlock};

/// Collapsible extraction is skipped for content of this many characters or more.
pub const DEFAULT_COLLAPSIBLE_LIMIT: usize = 50_000;

/// Tunables for a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub collapsible_limit: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            collapsible_limit: DEFAULT_COLLAPSIBLE_LIMIT,
        }
    }
}

/// Parses `content` into an ordered block list.
///
/// `is_streaming` marks content that is still arriving. It lets an unclosed
/// trailing `<details>` region render as a collapsible instead of raw tags.
pub fn parse_with(content: &str, is_streaming: bool, options: &ParseOptions) -> Vec<ContentBlock> {
    parse_at_depth(content, is_streaming, options, 0)
}

/// `depth` counts the collapsibles enclosing `content`.
fn parse_at_depth(
    content: &str,
    is_streaming: bool,
    options: &ParseOptions,
    depth: usize,
) -> Vec<ContentBlock> {
    if content.is_empty() {
        return vec![];
    }

    let sanitized = sanitize::sanitize(content);
    let extraction = if depth < collapsible::MAX_DEPTH {
        collapsible::extract(
            &sanitized,
            is_streaming,
            options.collapsible_limit,
            |inner| parse_at_depth(inner, is_streaming, options, depth + 1),
        )
    } else {
        log::debug!("collapsible depth {depth} reached, leaving nested regions literal");
        collapsible::Extraction::unchanged(&sanitized)
    };

    let mut builder = BlockBuilder::new(extraction.collapsibles);
    for line in extraction.text.lines() {
        builder.push(line);
    }
    let blocks = builder.finish();
    log::trace!(
        "parsed {} bytes into {} block(s)",
        content.len(),
        blocks.len()
    );

    if blocks.is_empty() {
        return vec![ContentBlock::Paragraph { text: sanitized }];
    }
    blocks
}
