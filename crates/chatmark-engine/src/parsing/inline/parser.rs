use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Mention, Strikethrough},
    types::InlineSegment,
};

/// Splits block text into code, mention, strikethrough and plain segments.
///
/// The passes run in order and each only scans the plain text left by the
/// previous one:
///
/// 1. backtick code spans (an unterminated opening run stays literal)
/// 2. `@mentions`
/// 3. `~~strikethrough~~` pairs (an unmatched `~~` stays literal)
///
/// Adjacent plain segments are merged, so the result never holds two
/// `Text` segments in a row.
pub fn segment_inline(s: &str) -> Vec<InlineSegment> {
    let mut out = vec![];
    for seg in split_code_spans(s) {
        let InlineSegment::Text(text) = seg else {
            out.push(seg);
            continue;
        };
        for seg in split_mentions(&text) {
            match seg {
                InlineSegment::Text(text) => out.extend(split_strikethrough(&text)),
                other => out.push(other),
            }
        }
    }
    merge_text(out)
}

fn push_text(out: &mut Vec<InlineSegment>, text: &str) {
    if !text.is_empty() {
        out.push(InlineSegment::Text(text.to_string()));
    }
}

fn merge_text(segments: Vec<InlineSegment>) -> Vec<InlineSegment> {
    let mut out: Vec<InlineSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if let (Some(InlineSegment::Text(prev)), InlineSegment::Text(next)) = (out.last_mut(), &seg)
        {
            prev.push_str(next);
            continue;
        }
        out.push(seg);
    }
    out
}

fn split_code_spans(s: &str) -> Vec<InlineSegment> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = cur.pos();

    while !cur.eof() {
        if cur.peek() != Some(CodeSpan::TICK) {
            cur.bump();
            continue;
        }
        let open_start = cur.pos();
        match try_parse_code_span(&mut cur) {
            Some(inner) => {
                push_text(&mut out, cur.slice(text_start, open_start));
                out.push(InlineSegment::Code(inner.to_string()));
                text_start = cur.pos();
            }
            None => {
                // Skip the whole opening run so it cannot close a later span.
                let run = cur.run_len(CodeSpan::TICK);
                cur.bump_n(run);
            }
        }
    }

    push_text(&mut out, cur.slice(text_start, cur.pos()));
    out
}

/// Attempts to parse a code span starting at the current position.
///
/// The closing run must have the same number of backticks as the opening
/// one. Returns `None` if the span isn't closed; cursor position is restored.
fn try_parse_code_span<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let saved = cur.clone();
    let ticks = cur.run_len(CodeSpan::TICK);
    cur.bump_n(ticks);
    let inner_start = cur.pos();

    while !cur.eof() {
        if cur.peek() == Some(CodeSpan::TICK) {
            let run = cur.run_len(CodeSpan::TICK);
            if run == ticks {
                let inner = cur.slice(inner_start, cur.pos());
                cur.bump_n(run);
                return Some(inner);
            }
            cur.bump_n(run);
        } else {
            cur.bump();
        }
    }

    // Not closed, restore cursor
    *cur = saved;
    None
}

fn split_mentions(s: &str) -> Vec<InlineSegment> {
    let mut out = vec![];
    let mut text_start = 0;
    let mut i = 0;

    while let Some(c) = s[i..].chars().next() {
        let at_boundary = s[..i].chars().next_back().is_none_or(char::is_whitespace);
        if c == Mention::SIGIL && at_boundary {
            let name_start = i + c.len_utf8();
            if let Some(len) = Mention::name_len(&s[name_start..]) {
                let name_end = name_start + len;
                push_text(&mut out, &s[text_start..i]);
                out.push(InlineSegment::Mention(s[name_start..name_end].to_string()));
                text_start = name_end;
                i = name_end;
                continue;
            }
        }
        i += c.len_utf8();
    }

    push_text(&mut out, &s[text_start..]);
    out
}

fn split_strikethrough(s: &str) -> Vec<InlineSegment> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    while !cur.eof() {
        if !cur.starts_with(Strikethrough::DELIM.as_bytes()) {
            cur.bump();
            continue;
        }
        let open = cur.pos();
        let inner_start = open + Strikethrough::DELIM.len();
        let close = s[inner_start..]
            .find(Strikethrough::DELIM)
            .map(|i| inner_start + i)
            .filter(|&close| close > inner_start);
        match close {
            Some(close) => {
                push_text(&mut out, &s[text_start..open]);
                out.push(InlineSegment::Strikethrough(s[inner_start..close].to_string()));
                cur.bump_n(close + Strikethrough::DELIM.len() - open);
                text_start = cur.pos();
            }
            // An opener with nothing after it, or `~~~~`, stays literal.
            None => cur.bump_n(Strikethrough::DELIM.len()),
        }
    }

    push_text(&mut out, &s[text_start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> InlineSegment {
        InlineSegment::Text(s.into())
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(segment_inline("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn parse_code_span() {
        assert_eq!(
            segment_inline("run `cargo test` now"),
            vec![
                text("run "),
                InlineSegment::Code("cargo test".into()),
                text(" now")
            ]
        );
    }

    #[test]
    fn double_backtick_span_can_hold_a_tick() {
        assert_eq!(
            segment_inline("``a ` b``"),
            vec![InlineSegment::Code("a ` b".into())]
        );
    }

    #[test]
    fn unclosed_code_span_becomes_text() {
        assert_eq!(
            segment_inline("start `unclosed code"),
            vec![text("start `unclosed code")]
        );
    }

    #[test]
    fn unclosed_run_does_not_steal_later_tick() {
        assert_eq!(
            segment_inline("``open and `x`"),
            vec![text("``open and "), InlineSegment::Code("x".into())]
        );
    }

    #[test]
    fn code_span_suppresses_mentions_and_strike() {
        assert_eq!(
            segment_inline("`@Bob ~~x~~`"),
            vec![InlineSegment::Code("@Bob ~~x~~".into())]
        );
    }

    #[test]
    fn multi_word_mention() {
        assert_eq!(
            segment_inline("@Opta Max hello"),
            vec![InlineSegment::Mention("Opta Max".into()), text(" hello")]
        );
    }

    #[test]
    fn mention_needs_whitespace_before() {
        assert_eq!(
            segment_inline("mail me@example.com or @alice"),
            vec![
                text("mail me@example.com or "),
                InlineSegment::Mention("alice".into())
            ]
        );
    }

    #[test]
    fn mention_needs_letter_after() {
        assert_eq!(segment_inline("@ 5 @3d"), vec![text("@ 5 @3d")]);
    }

    #[test]
    fn mention_after_code_span_starts_segment() {
        assert_eq!(
            segment_inline("`x`@Bob"),
            vec![
                InlineSegment::Code("x".into()),
                InlineSegment::Mention("Bob".into())
            ]
        );
    }

    #[test]
    fn adjacent_mentions() {
        assert_eq!(
            segment_inline("@ann @Ben Carter said"),
            vec![
                InlineSegment::Mention("ann".into()),
                text(" "),
                InlineSegment::Mention("Ben Carter".into()),
                text(" said"),
            ]
        );
    }

    #[test]
    fn strikethrough_pair() {
        assert_eq!(
            segment_inline("was ~~wrong~~ right"),
            vec![
                text("was "),
                InlineSegment::Strikethrough("wrong".into()),
                text(" right")
            ]
        );
    }

    #[test]
    fn unmatched_strikethrough_is_literal() {
        assert_eq!(
            segment_inline("~~done~~ and ~~still going"),
            vec![
                InlineSegment::Strikethrough("done".into()),
                text(" and ~~still going")
            ]
        );
    }

    #[test]
    fn empty_strikethrough_is_literal() {
        assert_eq!(segment_inline("~~~~"), vec![text("~~~~")]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(segment_inline(""), vec![]);
    }
}
