/// Bullet list item: `- `, `* ` or `+ `, possibly indented.
pub struct BulletMarker;

impl BulletMarker {
    pub const MARKERS: [char; 3] = ['-', '*', '+'];
    /// Leading spaces per nesting level.
    pub const INDENT_WIDTH: usize = 2;

    /// Returns `(indent_level, content)` for a bullet line.
    pub fn parse(line: &str) -> Option<(usize, &str)> {
        let spaces = line.len() - line.trim_start_matches(' ').len();
        let rest = &line[spaces..];
        let mut chars = rest.chars();
        let marker = chars.next()?;
        if !Self::MARKERS.contains(&marker) {
            return None;
        }
        // Markers are ASCII, so the content starts two bytes in.
        if chars.next() != Some(' ') {
            return None;
        }
        Some((spaces / Self::INDENT_WIDTH, rest[2..].trim()))
    }
}

/// Numbered list item: `<digits>. `.
pub struct NumberedMarker;

impl NumberedMarker {
    /// Used when the digits do not fit a `u32`.
    pub const FALLBACK_NUMBER: u32 = 1;

    /// Returns `(number, content)` for a numbered line.
    pub fn parse(line: &str) -> Option<(u32, &str)> {
        let t = line.trim_start();
        let digits = t.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let rest = t[digits..].strip_prefix(". ")?;
        let number = t[..digits].parse().unwrap_or(Self::FALLBACK_NUMBER);
        Some((number, rest.trim()))
    }
}
