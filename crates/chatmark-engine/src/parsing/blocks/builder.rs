use super::{
    classify::{LineClass, MarkdownLineClassifier},
    kinds::{ChartFence, CodeFence, Paragraph, TableRow},
    types::{BulletItem, ContentBlock, NumberedItem, TableAlignment},
};

/// A table being collected row by row.
#[derive(Debug)]
struct TableDraft {
    header: String,
    /// Set once a valid separator follows the header.
    alignments: Option<Vec<TableAlignment>>,
    rows: Vec<String>,
}

/// The single open accumulator.
///
/// Opening a different kind always flushes the previous one first.
#[derive(Debug, Default)]
enum LeafState {
    #[default]
    None,
    Paragraph(Vec<String>),
    Bullets(Vec<BulletItem>),
    Numbered(Vec<NumberedItem>),
    Quote(Vec<String>),
    Code {
        language: Option<String>,
        lines: Vec<String>,
    },
    Table(TableDraft),
}

/// Line-driven state machine that turns placeholder-substituted text into
/// the final ordered block list.
pub struct BlockBuilder {
    classifier: MarkdownLineClassifier,
    /// Pre-built collapsibles, taken as their placeholders are reached.
    collapsibles: Vec<Option<ContentBlock>>,
    leaf: LeafState,
    out: Vec<ContentBlock>,
}

impl BlockBuilder {
    pub fn new(collapsibles: Vec<ContentBlock>) -> Self {
        Self {
            classifier: MarkdownLineClassifier,
            collapsibles: collapsibles.into_iter().map(Some).collect(),
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: &str) {
        let class = self.classifier.classify(line);

        if let LineClass::Placeholder(index) = class {
            self.flush();
            self.emit_collapsible(index);
            return;
        }

        if let LineClass::Fence { language } = class {
            self.toggle_fence(language);
            return;
        }

        if let LeafState::Code { lines, .. } = &mut self.leaf {
            lines.push(line.to_string());
            return;
        }

        if class == LineClass::TableRow {
            self.push_table_row(line);
            return;
        }
        self.finish_table();

        match class {
            LineClass::Image(image) => {
                self.flush();
                self.out.push(ContentBlock::Image(image));
            }
            LineClass::Rule => {
                self.flush();
                self.out.push(ContentBlock::HorizontalRule);
            }
            LineClass::Heading { level, text } => {
                self.flush();
                self.out.push(ContentBlock::Heading {
                    level,
                    text: text.to_string(),
                });
            }
            LineClass::Quote(text) => match &mut self.leaf {
                LeafState::Quote(lines) => lines.push(text.to_string()),
                _ => {
                    self.flush();
                    self.leaf = LeafState::Quote(vec![text.to_string()]);
                }
            },
            LineClass::Numbered { number, text } => {
                let item = NumberedItem {
                    number,
                    content: text.to_string(),
                };
                match &mut self.leaf {
                    LeafState::Numbered(items) => items.push(item),
                    _ => {
                        self.flush();
                        self.leaf = LeafState::Numbered(vec![item]);
                    }
                }
            }
            LineClass::Bullet { indent_level, text } => {
                let item = BulletItem {
                    content: text.to_string(),
                    indent_level,
                };
                match &mut self.leaf {
                    LeafState::Bullets(items) => items.push(item),
                    _ => {
                        self.flush();
                        self.leaf = LeafState::Bullets(vec![item]);
                    }
                }
            }
            LineClass::Text(text) => match &mut self.leaf {
                LeafState::Paragraph(lines) => lines.push(text.to_string()),
                _ => {
                    self.flush();
                    self.leaf = LeafState::Paragraph(vec![text.to_string()]);
                }
            },
            LineClass::Blank => self.flush_paragraph(),
            // Handled above.
            LineClass::Placeholder(_) | LineClass::Fence { .. } | LineClass::TableRow => {}
        }
    }

    pub fn finish(mut self) -> Vec<ContentBlock> {
        // EOF flush: an unterminated fence or a half-written table is still emitted.
        self.finish_table();
        self.flush();
        self.out
    }

    fn emit_collapsible(&mut self, index: usize) {
        match self.collapsibles.get_mut(index).and_then(Option::take) {
            Some(block) => self.out.push(block),
            None => log::debug!("dropping dangling collapsible placeholder {index}"),
        }
    }

    fn toggle_fence(&mut self, language: Option<&str>) {
        if matches!(self.leaf, LeafState::Code { .. }) {
            self.flush();
        } else {
            self.finish_table();
            self.flush();
            self.leaf = LeafState::Code {
                language: language.map(str::to_string),
                lines: vec![],
            };
        }
    }

    fn push_table_row(&mut self, line: &str) {
        match &mut self.leaf {
            LeafState::Table(draft) => match draft.alignments {
                Some(_) => draft.rows.push(line.to_string()),
                None => match TableRow::alignments(line) {
                    Some(alignments) => draft.alignments = Some(alignments),
                    None => {
                        // Header followed by a non-separator: both become prose.
                        let header = std::mem::take(&mut draft.header);
                        self.leaf = LeafState::Paragraph(vec![header, line.to_string()]);
                    }
                },
            },
            _ => {
                self.flush();
                self.leaf = LeafState::Table(TableDraft {
                    header: line.to_string(),
                    alignments: None,
                    rows: vec![],
                });
            }
        }
    }

    /// Closes an open table on a non-table line.
    ///
    /// Without a separator the header is demoted to an open paragraph so the
    /// line that ended the table can join it.
    fn finish_table(&mut self) {
        if !matches!(self.leaf, LeafState::Table(_)) {
            return;
        }
        let LeafState::Table(draft) = std::mem::take(&mut self.leaf) else {
            return;
        };
        match draft.alignments {
            Some(alignments) => {
                let table = TableRow::build(&draft.header, alignments, &draft.rows);
                self.out.push(ContentBlock::Table(table));
            }
            None => self.leaf = LeafState::Paragraph(vec![draft.header]),
        }
    }

    fn flush_paragraph(&mut self) {
        if matches!(self.leaf, LeafState::Paragraph(_)) {
            self.flush();
        }
    }

    /// Emits whatever accumulator is open. Tables must be finished first.
    fn flush(&mut self) {
        match std::mem::take(&mut self.leaf) {
            LeafState::None => {}
            LeafState::Paragraph(lines) => self.out.push(ContentBlock::Paragraph {
                text: Paragraph::join(&lines),
            }),
            LeafState::Bullets(items) => self.out.push(ContentBlock::BulletList { items }),
            LeafState::Numbered(items) => self.out.push(ContentBlock::NumberedList { items }),
            LeafState::Quote(lines) => self.out.push(ContentBlock::BlockQuote {
                text: lines.join("\n"),
            }),
            LeafState::Code { language, lines } => {
                self.out.push(code_block(lines.join("\n"), language));
            }
            LeafState::Table(draft) => {
                self.leaf = LeafState::Table(draft);
                self.finish_table();
                self.flush();
            }
        }
    }
}

/// Chart fences decode into a chart; anything else, or a failed decode,
/// stays a code block.
fn code_block(code: String, language: Option<String>) -> ContentBlock {
    if CodeFence::is_chart(language.as_deref()) {
        match ChartFence::decode(&code) {
            Ok(chart) => return ContentBlock::Chart(chart),
            Err(err) => log::debug!("chart fence fell back to code block: {err}"),
        }
    }
    ContentBlock::CodeBlock { code, language }
}
