//! Rich-text decoding of plain segments, and the formatter that drives it.
//!
//! Bold, italic and links are not parsed here. They are delegated to a
//! [`MarkupDecoder`]; the default one is backed by `pulldown-cmark`. A decode
//! failure is never surfaced: the formatter falls back to the raw text.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::{
    parser::segment_inline,
    types::{InlineSegment, RunStyle, StyledRun},
};

#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The markup parsed as block structure (list, heading, ...) rather than inline text.
    #[error("markup contains block structure: {0}")]
    UnsupportedBlock(String),
    #[error("markup produced no text")]
    Empty,
}

/// Turns a plain string into styled runs for bold, italic and links.
pub trait MarkupDecoder {
    fn decode(&self, markup: &str) -> Result<Vec<StyledRun>, MarkupError>;
}

/// [`MarkupDecoder`] backed by `pulldown-cmark`'s CommonMark inline parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkDecoder;

impl MarkupDecoder for CmarkDecoder {
    fn decode(&self, markup: &str) -> Result<Vec<StyledRun>, MarkupError> {
        let mut runs = vec![];
        let mut bold = 0u32;
        let mut italic = 0u32;
        let mut links: Vec<String> = vec![];

        for event in Parser::new_ext(markup, Options::empty()) {
            let style = RunStyle {
                bold: bold > 0,
                italic: italic > 0,
                link: links.last().cloned(),
                ..RunStyle::default()
            };
            match event {
                Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph) => {}
                Event::Start(Tag::Strong) => bold += 1,
                Event::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
                Event::Start(Tag::Emphasis) => italic += 1,
                Event::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
                Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.to_string()),
                Event::End(TagEnd::Link) => {
                    links.pop();
                }
                // Inline images render as their alt text.
                Event::Start(Tag::Image { .. }) | Event::End(TagEnd::Image) => {}
                Event::Text(text) | Event::InlineHtml(text) => {
                    runs.push(StyledRun::styled(text.to_string(), style));
                }
                Event::Code(code) => runs.push(StyledRun::styled(
                    code.to_string(),
                    RunStyle {
                        code: true,
                        ..style
                    },
                )),
                Event::SoftBreak | Event::HardBreak => {
                    runs.push(StyledRun::styled("\n", style));
                }
                other => return Err(MarkupError::UnsupportedBlock(format!("{other:?}"))),
            }
        }

        if runs.is_empty() {
            return Err(MarkupError::Empty);
        }
        Ok(runs)
    }
}

/// Full inline pass for one block's text: structural segments first, then
/// markup decoding of what is left.
#[derive(Debug, Default, Clone)]
pub struct InlineFormatter<D = CmarkDecoder> {
    decoder: D,
}

impl<D: MarkupDecoder> InlineFormatter<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    pub fn format(&self, text: &str) -> Vec<StyledRun> {
        let mut runs = vec![];
        for seg in segment_inline(text) {
            match seg {
                InlineSegment::Text(t) => self.decode_into(&mut runs, &t, RunStyle::default()),
                InlineSegment::Code(code) => runs.push(StyledRun::styled(
                    code,
                    RunStyle {
                        code: true,
                        ..RunStyle::default()
                    },
                )),
                InlineSegment::Mention(name) => runs.push(StyledRun::styled(
                    format!("{}{name}", super::kinds::Mention::SIGIL),
                    RunStyle {
                        mention: Some(name),
                        ..RunStyle::default()
                    },
                )),
                InlineSegment::Strikethrough(t) => self.decode_into(
                    &mut runs,
                    &t,
                    RunStyle {
                        strikethrough: true,
                        ..RunStyle::default()
                    },
                ),
            }
        }
        merge_runs(runs)
    }

    /// Decodes `text`, layering `base` onto every run.
    ///
    /// Leading and trailing whitespace is kept verbatim because a CommonMark
    /// paragraph would strip it.
    fn decode_into(&self, runs: &mut Vec<StyledRun>, text: &str, base: RunStyle) {
        let core = text.trim();
        if core.is_empty() {
            runs.push(StyledRun::styled(text, base));
            return;
        }
        let lead_len = text.len() - text.trim_start().len();
        let lead = &text[..lead_len];
        let trail = &text[lead_len + core.len()..];

        match self.decoder.decode(core) {
            Ok(decoded) => {
                if !lead.is_empty() {
                    runs.push(StyledRun::styled(lead, base.clone()));
                }
                runs.extend(decoded.into_iter().map(|run| layer(run, &base)));
                if !trail.is_empty() {
                    runs.push(StyledRun::styled(trail, base));
                }
            }
            Err(err) => {
                log::debug!("markup decode failed, using raw text: {err}");
                runs.push(StyledRun::styled(text, base));
            }
        }
    }
}

fn layer(mut run: StyledRun, base: &RunStyle) -> StyledRun {
    run.style.bold |= base.bold;
    run.style.italic |= base.italic;
    run.style.strikethrough |= base.strikethrough;
    run.style.code |= base.code;
    run
}

/// Joins neighbouring runs that ended up with the same style.
fn merge_runs(runs: Vec<StyledRun>) -> Vec<StyledRun> {
    let mut out: Vec<StyledRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match out.last_mut() {
            Some(prev) if prev.style == run.style && run.style.mention.is_none() => {
                prev.text.push_str(&run.text);
            }
            _ => out.push(run),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bold() -> RunStyle {
        RunStyle {
            bold: true,
            ..RunStyle::default()
        }
    }

    #[test]
    fn decode_bold_run() {
        let runs = CmarkDecoder.decode("inner **bold**").unwrap();
        assert_eq!(
            runs,
            vec![StyledRun::plain("inner "), StyledRun::styled("bold", bold())]
        );
    }

    #[test]
    fn decode_link() {
        let runs = CmarkDecoder.decode("[docs](https://example.com)").unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "docs");
        assert_eq!(runs[0].style.link.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn decode_nested_emphasis() {
        let runs = CmarkDecoder.decode("***both***").unwrap();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].style.bold && runs[0].style.italic);
    }

    #[test]
    fn escaped_bracket_is_literal() {
        let runs = CmarkDecoder.decode(r"\[docs](https://ex").unwrap();
        let text: String = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(text, "[docs](https://ex");
    }

    #[test]
    fn block_structure_is_rejected() {
        assert!(matches!(
            CmarkDecoder.decode("- item"),
            Err(MarkupError::UnsupportedBlock(_))
        ));
    }

    #[test]
    fn formatter_keeps_surrounding_whitespace() {
        let runs = InlineFormatter::<CmarkDecoder>::default().format("@Opta Max hello");
        assert_eq!(
            runs,
            vec![
                StyledRun::styled(
                    "@Opta Max",
                    RunStyle {
                        mention: Some("Opta Max".into()),
                        ..RunStyle::default()
                    }
                ),
                StyledRun::plain(" hello"),
            ]
        );
    }

    #[test]
    fn formatter_layers_strikethrough() {
        let runs = InlineFormatter::<CmarkDecoder>::default().format("~~**gone**~~ kept");
        assert_eq!(
            runs,
            vec![
                StyledRun::styled(
                    "gone",
                    RunStyle {
                        bold: true,
                        strikethrough: true,
                        ..RunStyle::default()
                    }
                ),
                StyledRun::plain(" kept"),
            ]
        );
    }

    #[test]
    fn formatter_falls_back_to_raw_text() {
        let runs = InlineFormatter::<CmarkDecoder>::default().format("# not inline");
        assert_eq!(runs, vec![StyledRun::plain("# not inline")]);
    }

    #[test]
    fn formatter_code_span_is_raw() {
        let runs = InlineFormatter::<CmarkDecoder>::default().format("use `**x**`");
        assert_eq!(runs[1].text, "**x**");
        assert!(runs[1].style.code);
        assert!(!runs[1].style.bold);
    }

    struct FailingDecoder;

    impl MarkupDecoder for FailingDecoder {
        fn decode(&self, _markup: &str) -> Result<Vec<StyledRun>, MarkupError> {
            Err(MarkupError::Empty)
        }
    }

    #[test]
    fn custom_decoder_failure_uses_raw_text() {
        let runs = InlineFormatter::new(FailingDecoder).format("some **markup**");
        assert_eq!(runs, vec![StyledRun::plain("some **markup**")]);
    }
}
