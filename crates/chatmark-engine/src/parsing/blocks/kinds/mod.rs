//! # Block Kinds
//!
//! Block-specific types that own their syntax delimiters and recognition
//! rules. Classifier and builder code calls into these; it never hardcodes
//! `#`, `|` or a fence string itself.

pub mod block_quote;
pub mod chart;
pub mod code_fence;
pub mod heading;
pub mod image;
pub mod list;
pub mod paragraph;
pub mod rule;
pub mod table;

pub use block_quote::BlockQuote;
pub use chart::{ChartError, ChartFence};
pub use code_fence::{CodeFence, FenceSig};
pub use heading::Heading;
pub use image::ImageLine;
pub use list::{BulletMarker, NumberedMarker};
pub use paragraph::Paragraph;
pub use rule::HorizontalRule;
pub use table::TableRow;
