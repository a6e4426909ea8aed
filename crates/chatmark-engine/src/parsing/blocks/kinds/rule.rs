/// Horizontal rule: three or more of one rule character.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const CHARS: [char; 3] = ['-', '*', '_'];
    pub const MIN_LEN: usize = 3;

    /// Spaces between the markers are allowed (`* * *`); mixing markers is not.
    pub fn matches(line: &str) -> bool {
        let mut marks = line.chars().filter(|c| !c.is_whitespace());
        let Some(first) = marks.next() else {
            return false;
        };
        if !Self::CHARS.contains(&first) {
            return false;
        }
        let mut count = 1;
        for c in marks {
            if c != first {
                return false;
            }
            count += 1;
        }
        count >= Self::MIN_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("---", true)]
    #[case("***", true)]
    #[case("___", true)]
    #[case("----------", true)]
    #[case("* * *", true)]
    #[case("--", false)]
    #[case("-*-", false)]
    #[case("--- text", false)]
    #[case("", false)]
    #[case("===", false)]
    fn rule_detection(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(HorizontalRule::matches(line), expected);
    }
}
