use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::text::{collapse_whitespace, is_terminator, trailing_char};

lazy_static! {
    static ref PARAGRAPH: Regex = Regex::new(r"(?is)<p>(.*?)</p>").unwrap();
}

/// Bodies of every `<p>...</p>` block, left to right. Unclosed blocks are skipped.
pub fn extract_paragraphs(html: &str) -> impl Iterator<Item = &str> + '_ {
    PARAGRAPH
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Merges paragraph fragments until one ends a sentence, then emits it.
///
/// Only the pushed fragment is inspected for the terminator; `tail` carries
/// the last visible character of the buffer across fragments that render to
/// nothing.
#[derive(Debug, Default)]
pub struct Resegmenter {
    buffer: String,
    tail: Option<char>,
    out: String,
    committed: usize,
}

impl Resegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        let text = collapse_whitespace(fragment);
        if text.is_empty() {
            trace!("skipping empty paragraph");
            return;
        }
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(&text);
        if let Some(c) = trailing_char(&text) {
            self.tail = Some(c);
        }
        if self.tail.is_some_and(is_terminator) {
            self.commit();
        }
    }

    fn commit(&mut self) {
        self.out.push_str("<p>");
        self.out.push_str(&self.buffer);
        self.out.push_str("</p>");
        self.buffer.clear();
        self.tail = None;
        self.committed += 1;
    }

    /// Number of paragraphs emitted so far.
    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn finish(mut self) -> String {
        if !self.buffer.is_empty() {
            debug!("flushing unterminated paragraph");
            self.commit();
        }
        debug!(paragraphs = self.committed, "resegmented");
        self.out
    }
}

/// Re-segments already decoded HTML into sentence-complete `<p>` blocks.
pub fn resegment(decoded: &str) -> String {
    let mut seg = Resegmenter::new();
    for body in extract_paragraphs(decoded) {
        seg.push(body);
    }
    seg.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_order_case_insensitive() {
        let html = "x<p>one</p> y <P>two\nlines</P><p>three</p>";
        let got: Vec<&str> = extract_paragraphs(html).collect();
        assert_eq!(got, vec!["one", "two\nlines", "three"]);
    }

    #[test]
    fn unclosed_paragraph_is_ignored() {
        let got: Vec<&str> = extract_paragraphs("<p>open only").collect();
        assert!(got.is_empty());
        assert_eq!(resegment("<p>open only"), "");
    }

    #[test]
    fn drops_content_outside_paragraphs() {
        assert_eq!(resegment("hello <b>world</b>"), "");
        assert_eq!(resegment("lead<p>Kept.</p>tail"), "<p>Kept.</p>");
    }

    #[test]
    fn merges_until_terminator() {
        let html = "<p>The quick</p><p>brown fox</p><p>jumps.</p><p>Next!</p>";
        assert_eq!(
            resegment(html),
            "<p>The quick brown fox jumps.</p><p>Next!</p>"
        );
    }

    #[test]
    fn empty_blocks_do_not_break_a_merge() {
        let html = "<p>Half</p><p> \n </p><p>done?</p>";
        assert_eq!(resegment(html), "<p>Half done?</p>");
    }

    #[test]
    fn flushes_trailing_fragment_without_inventing_terminator() {
        assert_eq!(
            resegment("<p>First.</p><p>second</p><p>third</p>"),
            "<p>First.</p><p>second third</p>"
        );
    }

    #[test]
    fn counts_commits() {
        let mut seg = Resegmenter::new();
        seg.push("a.");
        seg.push("b");
        assert_eq!(seg.committed(), 1);
        assert_eq!(seg.finish(), "<p>a.</p><p>b</p>");
    }

    #[test]
    fn decoded_less_than_does_not_block_a_commit() {
        assert_eq!(
            resegment("<p>We need x<y.</p><p>Then stop</p>"),
            "<p>We need x<y.</p><p>Then stop</p>"
        );
    }

    #[test]
    fn terminator_before_empty_markup_still_commits() {
        assert_eq!(
            resegment("<p>Over <b>here</b></p><p>now.<br></p><p>Next</p>"),
            "<p>Over <b>here</b> now.<br></p><p>Next</p>"
        );
        assert_eq!(
            resegment("<p>Stop.</p><p><br></p><p>again</p>"),
            "<p>Stop.</p><p><br> again</p>"
        );
    }

    #[test]
    fn long_run_of_marked_up_fragments_merges_into_one() {
        let html: String = (0..500)
            .map(|i| format!("<p>word <em>{i}</em></p>"))
            .chain(std::iter::once("<p>end.</p>".to_string()))
            .collect();
        let out = resegment(&html);
        assert!(out.starts_with("<p>word <em>0</em> word <em>1</em>"));
        assert!(out.ends_with("word <em>499</em> end.</p>"));
        assert_eq!(out.matches("<p>").count(), 1);
    }

    #[test]
    fn inline_markup_is_kept_verbatim() {
        assert_eq!(
            resegment("<p>Say <em>hi</em></p><p>to <b>all.</b></p>"),
            "<p>Say <em>hi</em> to <b>all.</b></p>"
        );
    }
}
