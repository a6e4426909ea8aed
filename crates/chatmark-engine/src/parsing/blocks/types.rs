use serde::Serialize;

/// One node of the parsed block tree.
///
/// Every variant owns its text; a tree is an immutable value derived from a
/// single content string and is thrown away when the content changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Default leaf block when no other block shape matches.
    Paragraph { text: String },
    /// A run of consecutive `-`, `*` or `+` items.
    BulletList { items: Vec<BulletItem> },
    /// A run of consecutive `1.` style items.
    NumberedList { items: Vec<NumberedItem> },
    /// Consecutive `>` lines with the prefix stripped.
    BlockQuote { text: String },
    /// An ATX heading, `level` is always within 1..=6.
    Heading { level: u8, text: String },
    HorizontalRule,
    /// A fenced code block. Unterminated fences still produce one of these.
    CodeBlock {
        code: String,
        language: Option<String>,
    },
    /// A `<details>` region whose body was parsed by the same pipeline.
    Collapsible {
        summary: String,
        nested: Vec<ContentBlock>,
        is_open: bool,
    },
    Table(Table),
    Chart(Chart),
    Image(Image),
}

impl ContentBlock {
    /// Returns the raw text that inline formatting applies to, if any.
    ///
    /// Only prose-bearing blocks carry inline markup; code, tables and charts
    /// are rendered from their structured fields instead.
    pub fn inline_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph { text }
            | ContentBlock::BlockQuote { text }
            | ContentBlock::Heading { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Short name of the variant, used by outlines and log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentBlock::Paragraph { .. } => "Paragraph",
            ContentBlock::BulletList { .. } => "BulletList",
            ContentBlock::NumberedList { .. } => "NumberedList",
            ContentBlock::BlockQuote { .. } => "BlockQuote",
            ContentBlock::Heading { .. } => "Heading",
            ContentBlock::HorizontalRule => "HorizontalRule",
            ContentBlock::CodeBlock { .. } => "CodeBlock",
            ContentBlock::Collapsible { .. } => "Collapsible",
            ContentBlock::Table(_) => "Table",
            ContentBlock::Chart(_) => "Chart",
            ContentBlock::Image(_) => "Image",
        }
    }
}

/// A bullet list entry. `indent_level` is half the leading space count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulletItem {
    pub content: String,
    pub indent_level: usize,
}

/// A numbered list entry. `number` falls back to 1 when the digits overflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedItem {
    pub number: u32,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A rectangular table.
///
/// # Invariants
///
/// - every entry of `rows` has exactly `headers.len()` cells
/// - `alignments` may be shorter than `headers`; see [`Table::alignment`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub alignments: Vec<TableAlignment>,
}

impl Table {
    /// Alignment for `column`, defaulting to left when the separator row was short.
    pub fn alignment(&self, column: usize) -> TableAlignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A chart decoded from a ```` ```chart ```` fence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: Option<String>,
    pub points: Vec<ChartPoint>,
}

/// A standalone `![alt](url "caption")` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt_text: String,
    pub caption: Option<String>,
}
