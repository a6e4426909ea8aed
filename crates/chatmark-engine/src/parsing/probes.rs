//! Streaming probes.
//!
//! Cheap checks a presentation layer runs on the raw content to decide on an
//! alternate treatment while a message is still arriving. They are not part
//! of the block tree.

use super::blocks::kinds::{CodeFence, TableRow};

/// True iff the number of ```` ``` ```` fence lines is odd.
pub fn has_unterminated_code_fence(content: &str) -> bool {
    CodeFence::count(content) % 2 == 1
}

/// True iff a table header has been seen with no separator after it yet, or
/// the final line is a row that is still being written.
///
/// Lines inside fenced code are ignored.
pub fn has_incomplete_table(content: &str) -> bool {
    let mut in_code = false;
    let mut pending_header = false;
    let mut in_table = false;

    for line in content.lines() {
        if CodeFence::sig(line).is_some() {
            in_code = !in_code;
            pending_header = false;
            in_table = false;
            continue;
        }
        if in_code {
            continue;
        }
        if TableRow::is_row(line) {
            if pending_header {
                // Either the separator arrives or the header is demoted to prose.
                pending_header = false;
                in_table = TableRow::alignments(line).is_some();
            } else if !in_table {
                pending_header = true;
            }
        } else {
            pending_header = false;
            in_table = false;
        }
    }

    if pending_header {
        return true;
    }

    // A trailing newline means the last row was finished.
    if in_code || content.ends_with('\n') {
        return false;
    }
    content.lines().last().is_some_and(|last| {
        let t = last.trim();
        t.starts_with(TableRow::PIPE) && !TableRow::is_row(t)
    })
}
