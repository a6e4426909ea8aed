//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`outline`**: renders a block tree as a stable, indented text outline
//!   for `insta` snapshots and for the CLI's `tree` output
//! - **`invariants`**: runtime checks for tree shape (rectangular tables,
//!   heading levels in range, non-empty charts), recursing into collapsibles
//!
//! ## Testing Strategy
//!
//! Fixtures in `tests/fixtures/*.md` are parsed and their outlines snapshotted
//! next to them. A fixture's snapshot is the contract for that input.

pub mod invariants;
pub mod outline;

pub use invariants::check as invariants;
pub use outline::outline;
