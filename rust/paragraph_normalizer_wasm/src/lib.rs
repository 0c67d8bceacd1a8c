mod capitalize;
mod entities;
mod error;
mod ffi;
mod paragraphs;
mod pipeline;
mod text;

pub use capitalize::capitalize_paragraphs;
#[cfg(feature = "html-entities")]
pub use entities::HtmlEntityDecoder;
pub use entities::{DecoderKind, EntityDecoder, MinimalDecoder, DECODER_ENV};
pub use error::ConfigError;
pub use paragraphs::{extract_paragraphs, resegment, Resegmenter};
pub use pipeline::{default_normalizer, sanitize_all_html, Normalizer, Options};
pub use text::{collapse_whitespace, ends_with_terminator, is_terminator, rendered_text, trailing_char};

use ffi::transform;

#[no_mangle]
pub extern "C" fn api_version() -> u32 {
    1
}

#[no_mangle]
pub extern "C" fn normalize_paragraphs(ptr: u32, len: u32) -> u32 {
    transform(ptr, len, sanitize_all_html)
}

#[no_mangle]
pub extern "C" fn capitalize_paragraphs_html(ptr: u32, len: u32) -> u32 {
    transform(ptr, len, capitalize_paragraphs)
}

#[no_mangle]
pub extern "C" fn normalize_and_capitalize(ptr: u32, len: u32) -> u32 {
    transform(ptr, len, |s| {
        default_normalizer().run(s, &Options { capitalize: true })
    })
}
