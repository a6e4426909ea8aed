/// ATX heading: one to six `#` followed by a space.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    /// Returns `(level, text)` for a heading line.
    ///
    /// `#hashtag` and seven or more markers are not headings.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let t = line.trim_start();
        let level = t.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        // `#` is one byte, so `level` is also the byte offset.
        let rest = t[level..].strip_prefix(' ')?;
        Some((level as u8, rest.trim()))
    }
}
