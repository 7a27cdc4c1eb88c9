//! Batch topic extraction over comment bodies.
//!
//! The [`TopicExtractor`] trait is the seam the request handler calls
//! through; [`KeywordTopicExtractor`] is the shipped implementation. The
//! scoring algorithm is opaque to the rest of the service, which relies
//! only on the batch contract: one order-aligned [`TopicVector`] per input
//! [`Document`].

pub mod error;
pub mod extractor;
pub mod keyword;
pub mod models;

pub use error::ExtractError;
pub use extractor::TopicExtractor;
pub use keyword::KeywordTopicExtractor;
pub use models::{Document, TopicVector};

#[cfg(test)]
pub use extractor::MockTopicExtractor;
