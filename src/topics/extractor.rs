//! Topic extraction seam.

use async_trait::async_trait;

use super::error::ExtractError;
use super::models::{Document, TopicVector};

/// Batch topic scorer.
///
/// Implementations must be order-preserving: the result list has exactly
/// one [`TopicVector`] per input document, aligned by index, with
/// `source_text` copied from the matching document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicExtractor: Send + Sync {
    /// Scores each document against the extractor's topic set.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] when the batch cannot be analysed.
    async fn extract_topics(
        &self,
        documents: &[Document],
    ) -> Result<Vec<TopicVector>, ExtractError>;
}
