//! Data models passed across the topic-extraction seam.

/// A block of text submitted for topic scoring.
///
/// Derived one-to-one from a comment body; it exists only as extractor
/// input and never outlives the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The document text.
    pub text: String,
}

impl Document {
    /// Wraps a comment body as an extractor document.
    #[must_use]
    pub const fn new(text: String) -> Self {
        Self { text }
    }
}

/// Per-document topic scores, order-aligned with the submitted batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicVector {
    /// The text the scores were computed from.
    pub source_text: String,
    /// One score per topic index; length is fixed by the extractor's
    /// topic set.
    pub scores: Vec<f64>,
}
