//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK = b'\`'` - raw zone that suppresses other parsing
//! - **`Mention`**: `SIGIL = '@'` plus the name-extent rule
//! - **`Strikethrough`**: `DELIM = "~~"`
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in parser code.
//! The parser calls these constants; it never hardcodes `~~` or `` ` ``.

pub mod code_span;
pub mod mention;
pub mod strikethrough;

pub use code_span::CodeSpan;
pub use mention::Mention;
pub use strikethrough::Strikethrough;
