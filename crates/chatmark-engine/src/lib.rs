//! # chatmark-engine
//!
//! Streaming-resilient Markdown parsing for chat transcripts. Content that is
//! still being generated (half-written emphasis, open fences, tables missing
//! their separator, `<details>` regions without a closing tag) parses into a
//! sensible block tree at every prefix.
//!
//! ```
//! use chatmark_engine::{ContentBlock, parse};
//!
//! let blocks = parse("# Hi\n\nsome **bold", true);
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[1], ContentBlock::Paragraph { text: "some bold".into() });
//! ```

pub mod cache;
pub mod parsing;

pub use cache::{MarkdownParser, ParseCache, ParseIdentity};
pub use parsing::{
    ParseOptions,
    blocks::{
        BulletItem, Chart, ChartKind, ChartPoint, ContentBlock, Image, NumberedItem, Table,
        TableAlignment,
    },
    inline::{
        CmarkDecoder, InlineFormatter, InlineSegment, MarkupDecoder, RunStyle, StyledRun,
        segment_inline,
    },
    parse_with,
    probes::{has_incomplete_table, has_unterminated_code_fence},
};

/// Parses `content` with default options and no caching.
pub fn parse(content: &str, is_streaming: bool) -> Vec<ContentBlock> {
    parse_with(content, is_streaming, &ParseOptions::default())
}
