//! Error types exposed by the topic-extraction layer.

use thiserror::Error;

/// Errors surfaced while scoring documents against the topic set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The extractor failed to analyse the document batch.
    #[error("topic extraction failed: {message}")]
    Analysis {
        /// Detail from the underlying analysis.
        message: String,
    },
}
