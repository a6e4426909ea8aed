/// A line that opens or closes a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig<'a> {
    /// Info string after the backticks, `None` when empty.
    pub language: Option<&'a str>,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";

    /// Language tag that routes a fence body through the chart decoder.
    pub const CHART_LANGUAGE: &'static str = "chart";

    /// Recognises a fence line, ignoring leading indentation.
    pub fn sig(line: &str) -> Option<FenceSig<'_>> {
        let rest = line.trim_start().strip_prefix(Self::BACKTICKS)?;
        let info = rest.trim_start_matches('`').trim();
        Some(FenceSig {
            language: (!info.is_empty()).then_some(info),
        })
    }

    /// Returns true if the fence language asks for a chart.
    pub fn is_chart(language: Option<&str>) -> bool {
        language.is_some_and(|l| l.eq_ignore_ascii_case(Self::CHART_LANGUAGE))
    }

    /// Counts the fence lines in `content`.
    pub fn count(content: &str) -> usize {
        content.lines().filter(|l| Self::sig(l).is_some()).count()
    }
}
