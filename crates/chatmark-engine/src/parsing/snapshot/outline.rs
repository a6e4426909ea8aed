use crate::parsing::blocks::{ContentBlock, Table};

const INDENT: &str = "  ";

/// Renders `blocks` as one line per node, children indented under parents.
///
/// Text fields are printed with `{:?}` so embedded newlines stay on one line.
pub fn outline(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    write_blocks(&mut out, blocks, 0);
    out
}

fn line(out: &mut String, depth: usize, text: &str) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(text);
    out.push('\n');
}

fn write_blocks(out: &mut String, blocks: &[ContentBlock], depth: usize) {
    for block in blocks {
        write_block(out, block, depth);
    }
}

fn write_block(out: &mut String, block: &ContentBlock, depth: usize) {
    let name = block.kind_name();
    match block {
        ContentBlock::Paragraph { text } | ContentBlock::BlockQuote { text } => {
            line(out, depth, &format!("{name} {text:?}"));
        }
        ContentBlock::Heading { level, text } => {
            line(out, depth, &format!("{name} h{level} {text:?}"));
        }
        ContentBlock::HorizontalRule => line(out, depth, name),
        ContentBlock::BulletList { items } => {
            line(out, depth, name);
            for item in items {
                let pad = INDENT.repeat(item.indent_level);
                line(out, depth + 1, &format!("{pad}- {:?}", item.content));
            }
        }
        ContentBlock::NumberedList { items } => {
            line(out, depth, name);
            for item in items {
                line(out, depth + 1, &format!("{}. {:?}", item.number, item.content));
            }
        }
        ContentBlock::CodeBlock { code, language } => match language {
            Some(lang) => line(out, depth, &format!("{name} {lang} {code:?}")),
            None => line(out, depth, &format!("{name} {code:?}")),
        },
        ContentBlock::Collapsible {
            summary,
            nested,
            is_open,
        } => {
            let state = if *is_open { "open" } else { "closed" };
            line(out, depth, &format!("{name} {state} {summary:?}"));
            write_blocks(out, nested, depth + 1);
        }
        ContentBlock::Table(table) => write_table(out, table, depth),
        ContentBlock::Chart(chart) => {
            let kind = format!("{:?}", chart.kind).to_lowercase();
            match &chart.title {
                Some(title) => line(out, depth, &format!("{name} {kind} {title:?}")),
                None => line(out, depth, &format!("{name} {kind}")),
            }
            for point in &chart.points {
                let mut text = format!("{:?} = {}", point.label, point.value);
                if let Some(color) = &point.color {
                    text.push_str(&format!(" ({color})"));
                }
                line(out, depth + 1, &text);
            }
        }
        ContentBlock::Image(image) => {
            let mut text = format!("{name} {:?} alt={:?}", image.url, image.alt_text);
            if let Some(caption) = &image.caption {
                text.push_str(&format!(" caption={caption:?}"));
            }
            line(out, depth, &text);
        }
    }
}

fn write_table(out: &mut String, table: &Table, depth: usize) {
    let alignments: Vec<String> = (0..table.headers.len())
        .map(|col| format!("{:?}", table.alignment(col)).to_lowercase())
        .collect();
    line(out, depth, &format!("Table [{}]", alignments.join(", ")));
    line(out, depth + 1, &format!("header {}", cells(&table.headers)));
    for row in &table.rows {
        line(out, depth + 1, &format!("row {}", cells(row)));
    }
}

fn cells(cells: &[String]) -> String {
    let quoted: Vec<String> = cells.iter().map(|c| format!("{c:?}")).collect();
    format!("| {} |", quoted.join(" | "))
}
