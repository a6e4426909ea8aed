use crate::parsing::blocks::ContentBlock;

/// Panics if any block in the tree breaks a shape guarantee.
pub fn check(blocks: &[ContentBlock]) {
    for b in blocks {
        match b {
            ContentBlock::Heading { level, .. } => {
                assert!(
                    (1..=6).contains(level),
                    "heading level out of range: {level}"
                );
            }
            ContentBlock::Table(table) => {
                for (i, row) in table.rows.iter().enumerate() {
                    assert_eq!(
                        row.len(),
                        table.headers.len(),
                        "table row {i} is not rectangular: {row:?} vs headers {:?}",
                        table.headers
                    );
                }
                assert!(
                    table.alignments.len() <= table.headers.len(),
                    "more alignments than columns: {:?}",
                    table.alignments
                );
            }
            ContentBlock::Chart(chart) => {
                assert!(!chart.points.is_empty(), "chart without points");
            }
            ContentBlock::Image(image) => {
                assert!(!image.url.is_empty(), "image without url");
            }
            ContentBlock::Collapsible { nested, .. } => check(nested),
            _ => {}
        }
    }
}
