use lazy_static::lazy_static;
use tracing::trace;

use crate::capitalize::capitalize_paragraphs;
use crate::entities::{DecoderKind, EntityDecoder};
use crate::paragraphs::resegment;

/// Post-processing applied by [`Normalizer::run`]. The decoder belongs to the
/// `Normalizer` itself and is fixed when it is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub capitalize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { capitalize: true }
    }
}

pub struct Normalizer {
    decoder: Box<dyn EntityDecoder + Send + Sync>,
}

impl Normalizer {
    pub fn new(decoder: Box<dyn EntityDecoder + Send + Sync>) -> Self {
        Self { decoder }
    }

    pub fn from_kind(kind: DecoderKind) -> Self {
        trace!(decoder = %kind, "building normalizer");
        Self::new(kind.decoder())
    }

    pub fn from_env() -> Self {
        Self::from_kind(DecoderKind::detect())
    }

    /// Decodes entities, then re-segments the `<p>` blocks.
    pub fn normalize(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let decoded = self.decoder.decode(input);
        resegment(&decoded)
    }

    pub fn run(&self, input: &str, options: &Options) -> String {
        let out = self.normalize(input);
        if options.capitalize {
            capitalize_paragraphs(&out)
        } else {
            out
        }
    }
}

lazy_static! {
    static ref DEFAULT_NORMALIZER: Normalizer = Normalizer::from_env();
}

/// Process-wide normalizer, decoder chosen from the environment on first use.
pub fn default_normalizer() -> &'static Normalizer {
    &DEFAULT_NORMALIZER
}

pub fn sanitize_all_html(input: &str) -> String {
    default_normalizer().normalize(input)
}
