//! # Inline Formatting
//!
//! Inline formatting runs over the text of one block (paragraph, heading,
//! quote, list item) and is independent of block segmentation.
//!
//! ## Architecture
//!
//! Two passes, in a fixed order:
//!
//! 1. **Structural segments** (`parser`): code spans, `@Mentions` and
//!    `~~strikethrough~~` are split out by hand with a [`cursor::Cursor`].
//! 2. **Markup decoding** (`markup`): what remains as plain text is handed to
//!    a [`MarkupDecoder`] for bold, italic and links.
//!
//! ## Modules
//!
//! - **`types`**: `InlineSegment`, `StyledRun`, `RunStyle`
//! - **`kinds`**: inline kinds with owned delimiters (CodeSpan, Mention, Strikethrough)
//! - **`cursor`**: `Cursor` for byte-wise scanning with position tracking
//! - **`parser`**: `segment_inline()` entry point
//! - **`markup`**: `MarkupDecoder`, the `pulldown-cmark` backed decoder and `InlineFormatter`
//!
//! ## Raw Zone Precedence
//!
//! Code spans are raw: `` `@not_a_mention ~~x~~` `` is one Code segment and
//! is never decoded.

pub mod cursor;
pub mod kinds;
pub mod markup;
pub mod parser;
pub mod types;

pub use markup::{CmarkDecoder, InlineFormatter, MarkupDecoder, MarkupError};
pub use parser::segment_inline;
pub use types::{InlineSegment, RunStyle, StyledRun};
