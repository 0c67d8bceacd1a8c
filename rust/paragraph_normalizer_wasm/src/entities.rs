use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;

/// Environment variable consulted by [`DecoderKind::detect`].
pub const DECODER_ENV: &str = "PARAGRAPH_DECODER";

pub trait EntityDecoder {
    fn decode(&self, s: &str) -> String;
}

/// Decodes `&lt;`, `&gt;` and `&amp;` only. Anything else is left as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimalDecoder;

impl EntityDecoder for MinimalDecoder {
    fn decode(&self, s: &str) -> String {
        // &amp; must go last: "&amp;lt;" decodes to "&lt;", not "<".
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}

/// Full HTML decoding: every named entity plus decimal/hex numeric references.
#[cfg(feature = "html-entities")]
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlEntityDecoder;

#[cfg(feature = "html-entities")]
impl EntityDecoder for HtmlEntityDecoder {
    fn decode(&self, s: &str) -> String {
        html_escape::decode_html_entities(s).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderKind {
    Html,
    Minimal,
}

impl DecoderKind {
    pub fn default_for_build() -> Self {
        if cfg!(feature = "html-entities") {
            DecoderKind::Html
        } else {
            DecoderKind::Minimal
        }
    }

    /// Picks the decoder once at startup from `PARAGRAPH_DECODER`.
    pub fn detect() -> Self {
        Self::from_env_value(std::env::var(DECODER_ENV).ok().as_deref())
    }

    pub fn from_env_value(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default_for_build();
        };
        match raw.parse() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "ignoring {DECODER_ENV}");
                Self::default_for_build()
            }
        }
    }

    pub fn decoder(self) -> Box<dyn EntityDecoder + Send + Sync> {
        match self {
            DecoderKind::Html => html_decoder(),
            DecoderKind::Minimal => Box::new(MinimalDecoder),
        }
    }
}

#[cfg(feature = "html-entities")]
fn html_decoder() -> Box<dyn EntityDecoder + Send + Sync> {
    Box::new(HtmlEntityDecoder)
}

#[cfg(not(feature = "html-entities"))]
fn html_decoder() -> Box<dyn EntityDecoder + Send + Sync> {
    warn!("built without html-entities; using the minimal decoder");
    Box::new(MinimalDecoder)
}

impl FromStr for DecoderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(DecoderKind::Html),
            "minimal" => Ok(DecoderKind::Minimal),
            _ => Err(ConfigError::UnknownDecoder(s.to_string())),
        }
    }
}

impl fmt::Display for DecoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecoderKind::Html => f.write_str("html"),
            DecoderKind::Minimal => f.write_str("minimal"),
        }
    }
}
