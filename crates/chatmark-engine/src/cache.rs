//! # Parse Cache
//!
//! A single-slot memo for the most recent parse. Streaming renders resubmit
//! the same content many times between chunks; only a change of content
//! pays for a full parse.
//!
//! Content identity is `(length, 64-bit hash)`. Two different strings with the
//! same length and hash would share a result; that collision is accepted.
//! The streaming flag is stored beside the identity because it changes the
//! tree: a hit needs both to match.
//!
//! The lock is held only to look up or replace the slot, never while parsing.
//! Concurrent misses parse independently and the last one to finish wins the
//! slot.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::parsing::{ParseOptions, blocks::ContentBlock, parse_with};

/// Cheap identity of a content string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseIdentity {
    pub len: usize,
    pub hash: u64,
}

impl ParseIdentity {
    pub fn of(content: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        Self {
            len: content.len(),
            hash: hasher.finish(),
        }
    }
}

#[derive(Debug)]
struct Entry {
    identity: ParseIdentity,
    is_streaming: bool,
    blocks: Arc<Vec<ContentBlock>>,
}

#[derive(Debug, Default)]
pub struct ParseCache {
    slot: Mutex<Option<Entry>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached tree for `content` parsed with `is_streaming`, or
    /// runs `parse` and stores its result.
    pub fn get_or_parse<F>(
        &self,
        content: &str,
        is_streaming: bool,
        parse: F,
    ) -> Arc<Vec<ContentBlock>>
    where
        F: FnOnce(&str) -> Vec<ContentBlock>,
    {
        let identity = ParseIdentity::of(content);
        if let Some(entry) = self.slot.lock().as_ref() {
            if entry.identity == identity && entry.is_streaming == is_streaming {
                log::trace!("parse cache hit ({} bytes)", identity.len);
                return Arc::clone(&entry.blocks);
            }
        }

        let blocks = Arc::new(parse(content));
        *self.slot.lock() = Some(Entry {
            identity,
            is_streaming,
            blocks: Arc::clone(&blocks),
        });
        blocks
    }

    /// Identity of the content currently held, if any.
    pub fn identity(&self) -> Option<ParseIdentity> {
        self.slot.lock().as_ref().map(|entry| entry.identity)
    }

    pub fn clear(&self) {
        *self.slot.lock() = None;
    }
}

/// Parser front end that owns a [`ParseCache`] and its options.
///
/// Safe to share between threads; the result trees are immutable and handed
/// out behind an [`Arc`].
#[derive(Debug, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
    cache: ParseCache,
    full_parses: AtomicUsize,
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses `content`, reusing the previous tree when both the content and
    /// the streaming flag are unchanged.
    pub fn parse(&self, content: &str, is_streaming: bool) -> Arc<Vec<ContentBlock>> {
        self.cache.get_or_parse(content, is_streaming, |c| {
            self.full_parses.fetch_add(1, Ordering::Relaxed);
            log::debug!("full parse of {} bytes (streaming: {is_streaming})", c.len());
            parse_with(c, is_streaming, &self.options)
        })
    }

    /// How many times [`MarkdownParser::parse`] missed the cache.
    pub fn full_parses(&self) -> usize {
        self.full_parses.load(Ordering::Relaxed)
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn one_paragraph(text: &str) -> Vec<ContentBlock> {
        vec![ContentBlock::Paragraph {
            text: text.to_string(),
        }]
    }

    #[test]
    fn identity_depends_on_content() {
        assert_eq!(ParseIdentity::of("abc"), ParseIdentity::of("abc"));
        assert_ne!(ParseIdentity::of("abc"), ParseIdentity::of("abd"));
        assert_eq!(ParseIdentity::of("abc").len, 3);
    }

    #[test]
    fn hit_returns_same_tree_without_parsing() {
        let cache = ParseCache::new();
        let first = cache.get_or_parse("hello", false, one_paragraph);
        let second = cache.get_or_parse("hello", false, |_| panic!("should not reparse"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn new_content_replaces_slot() {
        let cache = ParseCache::new();
        cache.get_or_parse("a", false, one_paragraph);
        cache.get_or_parse("b", false, one_paragraph);
        assert_eq!(cache.identity(), Some(ParseIdentity::of("b")));

        let mut calls = 0;
        cache.get_or_parse("a", false, |c| {
            calls += 1;
            one_paragraph(c)
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn clear_empties_slot() {
        let cache = ParseCache::new();
        cache.get_or_parse("a", false, one_paragraph);
        cache.clear();
        assert_eq!(cache.identity(), None);
    }

    #[test]
    fn parser_counts_full_parses() {
        let parser = MarkdownParser::new();
        let content = "# Title\n\nbody";
        let first = parser.parse(content, false);
        let second = parser.parse(content, false);
        assert_eq!(parser.full_parses(), 1);
        assert_eq!(first, second);

        parser.parse("# Title\n\nbody and more", false);
        assert_eq!(parser.full_parses(), 2);
    }

    #[test]
    fn streaming_flag_change_is_a_miss() {
        let cache = ParseCache::new();
        cache.get_or_parse("a", true, one_paragraph);
        let mut calls = 0;
        cache.get_or_parse("a", false, |c| {
            calls += 1;
            one_paragraph(c)
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn settled_parse_after_stream_matches_uncached() {
        let parser = MarkdownParser::new();
        let content = "<details><summary>S</summary>\nbody";
        let streaming = parser.parse(content, true);
        assert!(matches!(streaming[0], ContentBlock::Collapsible { .. }));

        let settled = parser.parse(content, false);
        assert_eq!(
            *settled,
            parse_with(content, false, &ParseOptions::default())
        );
        assert_eq!(parser.full_parses(), 2);
    }

    #[test]
    fn parser_options_reach_pipeline() {
        let parser = MarkdownParser::with_options(ParseOptions {
            collapsible_limit: 1,
        });
        let blocks = parser.parse("<details><summary>S</summary>\nx\n</details>", false);
        assert!(
            blocks
                .iter()
                .all(|b| !matches!(b, ContentBlock::Collapsible { .. }))
        );
    }

    #[test]
    fn concurrent_readers_share_results() {
        let parser = MarkdownParser::new();
        let content = "- a\n- b\n\n| x | y |\n|---|---|\n| 1 | 2 |";
        let expected = parse_with(content, false, &ParseOptions::default());

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        assert_eq!(*parser.parse(content, false), expected);
                    }
                });
            }
        });
        // Racing misses may each parse, but never more than once per thread.
        assert!(parser.full_parses() >= 1 && parser.full_parses() <= 8);
    }
}
