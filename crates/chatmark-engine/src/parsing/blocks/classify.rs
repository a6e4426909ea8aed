use super::{
    kinds::{
        BlockQuote, BulletMarker, CodeFence, Heading, HorizontalRule, ImageLine, NumberedMarker,
        TableRow,
    },
    types::Image,
};
use crate::parsing::collapsible::Placeholder;

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context. Variants are listed in the
/// precedence order the classifier checks them.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass<'a> {
    /// Stand-in for an extracted collapsible region, by emission index.
    Placeholder(usize),
    /// Opening or closing code fence.
    Fence { language: Option<&'a str> },
    /// A `|`-wrapped row (header, separator or data; the builder decides).
    TableRow,
    Image(Image),
    Rule,
    Heading { level: u8, text: &'a str },
    Quote(&'a str),
    Numbered { number: u32, text: &'a str },
    Bullet { indent_level: usize, text: &'a str },
    Blank,
    Text(&'a str),
}

/// Classifies individual lines for the block parsing phase.
///
/// Dispatch is prefix and character-class based; only the image shape
/// reaches for a regex, and only once the line starts with `![`.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`].
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if let Some(index) = Placeholder::parse(line) {
            return LineClass::Placeholder(index);
        }
        if let Some(sig) = CodeFence::sig(line) {
            return LineClass::Fence {
                language: sig.language,
            };
        }
        if TableRow::is_row(line) {
            return LineClass::TableRow;
        }
        if let Some(image) = ImageLine::parse(line) {
            return LineClass::Image(image);
        }
        if HorizontalRule::matches(line) {
            return LineClass::Rule;
        }
        if let Some((level, text)) = Heading::parse(line) {
            return LineClass::Heading { level, text };
        }
        if let Some(text) = BlockQuote::strip_prefix(line) {
            return LineClass::Quote(text);
        }
        if let Some((number, text)) = NumberedMarker::parse(line) {
            return LineClass::Numbered { number, text };
        }
        if let Some((indent_level, text)) = BulletMarker::parse(line) {
            return LineClass::Bullet { indent_level, text };
        }
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        LineClass::Text(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classify(line: &str) -> LineClass<'_> {
        MarkdownLineClassifier.classify(line)
    }

    #[rstest]
    #[case("```rust", LineClass::Fence { language: Some("rust") })]
    #[case("| a | b |", LineClass::TableRow)]
    #[case("---", LineClass::Rule)]
    #[case("* * *", LineClass::Rule)]
    #[case("## Title", LineClass::Heading { level: 2, text: "Title" })]
    #[case("> quoted", LineClass::Quote("quoted"))]
    #[case("3. third", LineClass::Numbered { number: 3, text: "third" })]
    #[case("  - nested", LineClass::Bullet { indent_level: 1, text: "nested" })]
    #[case("   ", LineClass::Blank)]
    #[case("", LineClass::Blank)]
    #[case("just words", LineClass::Text("just words"))]
    fn classify_line(#[case] line: &str, #[case] expected: LineClass<'_>) {
        assert_eq!(classify(line), expected);
    }

    #[test]
    fn placeholder_beats_everything() {
        let token = Placeholder::token(4);
        assert_eq!(classify(&token), LineClass::Placeholder(4));
    }

    #[test]
    fn rule_beats_bullet() {
        assert_eq!(classify("- - -"), LineClass::Rule);
    }

    #[test]
    fn relative_image_falls_back_to_text() {
        assert_eq!(classify("![x](y.png)"), LineClass::Text("![x](y.png)"));
    }

    #[test]
    fn absolute_image_is_classified() {
        assert!(matches!(
            classify("![x](https://example.com/y.png)"),
            LineClass::Image(_)
        ));
    }
}
