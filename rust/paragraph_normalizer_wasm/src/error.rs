use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown decoder `{0}` (expected `html` or `minimal`)")]
    UnknownDecoder(String),
}
