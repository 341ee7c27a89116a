use thiserror::Error;

/// Failures around the decoder and the log.
///
/// Decoding and appending never fail; these only cover loading history,
/// pairing a reply with its question, reading configuration and setting up
/// logging.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Hydration error: {0}")]
    Hydration(serde_json::Error),
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("No question is waiting for a reply")]
    NoPendingQuestion,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Logging error: {0}")]
    Logging(String),
}
