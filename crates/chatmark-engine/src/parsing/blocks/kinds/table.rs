//! Pipe table recognition and construction.

use crate::parsing::blocks::types::{Table, TableAlignment};

/// Table syntax: `|`-wrapped rows and a `:?-+:?` separator row.
pub struct TableRow;

impl TableRow {
    pub const PIPE: char = '|';
    pub const ALIGN: char = ':';
    pub const DASH: char = '-';

    /// A row must both start and end with a pipe.
    pub fn is_row(line: &str) -> bool {
        let t = line.trim();
        t.len() >= 2 && t.starts_with(Self::PIPE) && t.ends_with(Self::PIPE)
    }

    /// Splits a row into trimmed cells, dropping the outer pipes.
    pub fn cells(line: &str) -> Vec<String> {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let t = t.strip_suffix(Self::PIPE).unwrap_or(t);
        t.split(Self::PIPE).map(|c| c.trim().to_string()).collect()
    }

    /// Parses a separator row into alignments, or `None` if any cell is not `:?-+:?`.
    pub fn alignments(line: &str) -> Option<Vec<TableAlignment>> {
        if !Self::is_row(line) {
            return None;
        }
        Self::cells(line)
            .iter()
            .map(|cell| Self::cell_alignment(cell))
            .collect()
    }

    fn cell_alignment(cell: &str) -> Option<TableAlignment> {
        let left = cell.starts_with(Self::ALIGN);
        let right = cell.len() > 1 && cell.ends_with(Self::ALIGN);
        let body = cell.strip_prefix(Self::ALIGN).unwrap_or(cell);
        let body = if right {
            body.strip_suffix(Self::ALIGN).unwrap_or(body)
        } else {
            body
        };
        if body.is_empty() || !body.chars().all(|c| c == Self::DASH) {
            return None;
        }
        Some(match (left, right) {
            (true, true) => TableAlignment::Center,
            (false, true) => TableAlignment::Right,
            _ => TableAlignment::Left,
        })
    }

    /// Builds a rectangular table: data rows are padded with empty cells or
    /// truncated to the header width. Extra separator cells are dropped.
    pub fn build(header: &str, mut alignments: Vec<TableAlignment>, rows: &[String]) -> Table {
        let headers = Self::cells(header);
        let width = headers.len();
        alignments.truncate(width);
        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = Self::cells(row);
                cells.resize(width, String::new());
                cells
            })
            .collect();
        Table {
            headers,
            rows,
            alignments,
        }
    }
}
