use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PARAGRAPH_START: Regex = Regex::new(r"<p>(.)").unwrap();
}

/// Uppercases the first character after every `<p>`. Non-letters pass through.
pub fn capitalize_paragraphs(html: &str) -> String {
    PARAGRAPH_START
        .replace_all(html, |caps: &Captures| format!("<p>{}", caps[1].to_uppercase()))
        .into_owned()
}
