use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use lazy_static::lazy_static;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapses every whitespace run (newlines included) to one space and trims.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

fn is_hidden_tag(lower: &str) -> bool {
    matches!(lower, "script" | "style" | "template" | "noscript")
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            if is_hidden_tag(&name.local.to_string().to_ascii_lowercase()) {
                return;
            }
            for c in node.children.borrow().iter() {
                collect_text(c, out);
            }
        }
        NodeData::Document => {
            for c in node.children.borrow().iter() {
                collect_text(c, out);
            }
        }
        _ => {}
    }
}

/// Text a reader would see: tags and attribute values removed.
pub fn rendered_text(fragment: &str) -> String {
    if !fragment.contains('<') {
        return fragment.to_string();
    }
    let dom = parse_document(RcDom::default(), Default::default()).one(fragment);
    let mut out = String::with_capacity(fragment.len());
    collect_text(&dom.document, &mut out);
    out
}

pub fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Last visible character of a fragment. The raw last character is used as is
/// unless it closes a tag; only then is the fragment parsed for its text.
/// `None` when the fragment renders to nothing (`<br>`, `<img>`).
pub fn trailing_char(fragment: &str) -> Option<char> {
    let last = fragment.trim_end().chars().last()?;
    if last != '>' {
        return Some(last);
    }
    rendered_text(fragment).trim_end().chars().last()
}

pub fn ends_with_terminator(fragment: &str) -> bool {
    trailing_char(fragment).is_some_and(is_terminator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_newlines_and_runs() {
        assert_eq!(collapse_whitespace("  Hello\n\n  world.\t"), "Hello world.");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn plain_text_is_checked_directly() {
        assert!(ends_with_terminator("Done."));
        assert!(ends_with_terminator("Really?"));
        assert!(ends_with_terminator("Stop!"));
        assert!(!ends_with_terminator("Not yet"));
        assert!(!ends_with_terminator("e.g. this one,"));
    }

    #[test]
    fn terminator_inside_inline_element_counts() {
        assert!(ends_with_terminator("Hello <b>world.</b>"));
        assert!(ends_with_terminator("Line one.<br>"));
    }

    #[test]
    fn terminator_in_attribute_is_ignored() {
        assert!(!ends_with_terminator(r#"See <a title="x.">the link</a>"#));
        assert!(!ends_with_terminator(r#"Picture <img alt="A cat!">"#));
    }

    #[test]
    fn decoded_angle_bracket_is_plain_text() {
        assert!(ends_with_terminator("We need x<y."));
        assert!(ends_with_terminator("a <b and c?"));
        assert!(!ends_with_terminator("1 < 2 and 3 > 2"));
    }

    #[test]
    fn empty_markup_has_no_trailing_char() {
        assert_eq!(trailing_char("<br>"), None);
        assert_eq!(trailing_char(r#"<img alt="x.">"#), None);
        assert_eq!(trailing_char("done.<br>"), Some('.'));
    }

    #[test]
    fn script_text_is_not_rendered() {
        assert_eq!(rendered_text("Hi<script>x = 1;</script>"), "Hi");
    }
}
