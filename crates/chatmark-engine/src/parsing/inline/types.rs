use serde::Serialize;

/// A piece of block text after the structural inline pass.
///
/// `Text` still carries markup (bold, italic, links) for the markup decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum InlineSegment {
    /// Plain text that isn't part of any special construct.
    Text(String),
    /// Backtick-delimited code, delimiters removed. A raw zone.
    Code(String),
    /// An `@mention`, sigil removed.
    Mention(String),
    /// The inside of a `~~text~~` pair.
    Strikethrough(String),
}

/// Styling applied to one run of rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mention: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl RunStyle {
    pub fn is_plain(&self) -> bool {
        *self == RunStyle::default()
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}
