//! # Block Segmentation
//!
//! Two-phase, single-pass block parsing over sanitized, placeholder-substituted text.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` from local facts only, in a fixed precedence order
//!    (placeholder, fence, table row, image, rule, heading, quote, numbered,
//!    bullet, blank, text)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps exactly one
//!    open accumulator and emits `ContentBlock`s as they close
//!
//! ## Modules
//!
//! - **`types`**: the output tree (`ContentBlock`, `Table`, `Chart`, `Image`, list items)
//! - **`kinds`**: block-specific types with owned delimiters and sub-parsers
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no classification inside
//! - Tables are rectangular; a header without a separator is prose
//! - Every open accumulator is flushed at end of input

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use types::{
    BulletItem, Chart, ChartKind, ChartPoint, ContentBlock, Image, NumberedItem, Table,
    TableAlignment,
};
