/// Paragraph block type.
///
/// Paragraphs have no delimiters - they are the default leaf block
/// when no other block opener matches. Inline parsing is applied
/// to paragraph content.
pub struct Paragraph;

impl Paragraph {
    /// Joins accumulated lines into paragraph text, trimming each line.
    pub fn join(lines: &[String]) -> String {
        lines
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_trims_each_line() {
        let lines = vec!["  first ".to_string(), "second\t".to_string()];
        assert_eq!(Paragraph::join(&lines), "first\nsecond");
    }
}
