use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::parsing::blocks::types::Image;

/// Standalone image line: `![alt](url)` or `![alt](url "caption")`.
pub struct ImageLine;

impl ImageLine {
    pub const OPEN: &'static str = "![";

    /// Parses a line that consists of nothing but an image.
    ///
    /// The URL must be absolute and parse with [`Url::parse`]; otherwise the
    /// line is not an image and falls through to paragraph handling.
    pub fn parse(line: &str) -> Option<Image> {
        static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
        let image_regex = IMAGE_REGEX.get_or_init(|| {
            Regex::new(r#"^!\[([^\]]*)\]\(\s*(\S+?)(?:\s+"([^"]*)")?\s*\)$"#)
                .expect("Invalid image regex")
        });

        let t = line.trim();
        if !t.starts_with(Self::OPEN) {
            return None;
        }
        let caps = image_regex.captures(t)?;
        let url = caps.get(2)?.as_str();
        if Url::parse(url).is_err() {
            return None;
        }
        Some(Image {
            url: url.to_string(),
            alt_text: caps.get(1).map_or("", |m| m.as_str()).to_string(),
            caption: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }
}
