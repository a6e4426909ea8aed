/// `@mention` recognition.
///
/// A mention starts at `@` when the `@` opens the segment or follows
/// whitespace, and the next character is a letter. The name runs over
/// letters and digits and may cross a single space only when the character
/// after that space is uppercase, so `@Opta Max hello` captures `Opta Max`.
pub struct Mention;

impl Mention {
    pub const SIGIL: char = '@';

    /// Length in bytes of the name starting right after the sigil, if any.
    pub fn name_len(rest: &str) -> Option<usize> {
        let mut chars = rest.char_indices().peekable();
        match chars.peek() {
            Some(&(_, c)) if c.is_alphabetic() => {}
            _ => return None,
        }

        let mut end = 0;
        while let Some((i, c)) = chars.next() {
            if c.is_alphanumeric() {
                end = i + c.len_utf8();
            } else if c == ' ' && chars.peek().is_some_and(|&(_, next)| next.is_uppercase()) {
                continue;
            } else {
                break;
            }
        }
        Some(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Opta Max hello", Some("Opta Max"))]
    #[case("alice, hi", Some("alice"))]
    #[case("Bob2 says", Some("Bob2"))]
    #[case("Ada Lovelace Byron rocks", Some("Ada Lovelace Byron"))]
    #[case("Zoë here", Some("Zoë"))]
    #[case("Max  Double", Some("Max"))]
    #[case("Max ", Some("Max"))]
    #[case("1abc", None)]
    #[case(" Max", None)]
    #[case("", None)]
    fn name(#[case] rest: &str, #[case] expected: Option<&str>) {
        assert_eq!(Mention::name_len(rest).map(|n| &rest[..n]), expected);
    }
}
