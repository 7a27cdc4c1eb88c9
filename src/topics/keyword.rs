//! Keyword-frequency topic extractor.
//!
//! Scores each document against a fixed table of topic definitions. The
//! score for a topic is the fraction of the document's tokens that match
//! one of the topic's terms, so every vector has one entry per topic in
//! table order and all scores fall in `[0.0, 1.0]`.

use async_trait::async_trait;

use super::error::ExtractError;
use super::extractor::TopicExtractor;
use super::models::{Document, TopicVector};

/// A named topic and the terms that indicate it.
struct TopicDefinition {
    name: &'static str,
    terms: &'static [&'static str],
}

/// Topic set tuned for issue-tracker discussions.
const TOPICS: &[TopicDefinition] = &[
    TopicDefinition {
        name: "defect",
        terms: &[
            "bug", "error", "crash", "panic", "fail", "fails", "failure", "broken", "regression",
            "fix", "fixed",
        ],
    },
    TopicDefinition {
        name: "feature",
        terms: &[
            "feature", "add", "support", "request", "proposal", "implement", "enhancement",
            "improve",
        ],
    },
    TopicDefinition {
        name: "question",
        terms: &["how", "why", "what", "when", "where", "question", "help", "docs"],
    },
    TopicDefinition {
        name: "gratitude",
        terms: &["thanks", "thank", "appreciated", "great", "awesome", "nice"],
    },
    TopicDefinition {
        name: "build",
        terms: &[
            "build", "compile", "cargo", "ci", "test", "tests", "release", "version", "dependency",
        ],
    },
];

/// [`TopicExtractor`] backed by the static keyword table.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordTopicExtractor;

impl KeywordTopicExtractor {
    /// Creates the extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Number of topics in the score vector.
    #[must_use]
    pub const fn topic_count() -> usize {
        TOPICS.len()
    }

    /// Names of the topics, in score-vector order.
    #[must_use]
    pub fn topic_names() -> Vec<&'static str> {
        TOPICS.iter().map(|topic| topic.name).collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|character: char| !character.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn score_document(text: &str) -> Vec<f64> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return vec![0.0; TOPICS.len()];
    }

    #[expect(clippy::cast_precision_loss, reason = "token counts are far below 2^52")]
    let total = tokens.len() as f64;
    TOPICS
        .iter()
        .map(|topic| {
            let matches = tokens
                .iter()
                .filter(|token| topic.terms.contains(&token.as_str()))
                .count();
            #[expect(clippy::cast_precision_loss, reason = "token counts are far below 2^52")]
            let matched = matches as f64;
            matched / total
        })
        .collect()
}

#[async_trait]
impl TopicExtractor for KeywordTopicExtractor {
    async fn extract_topics(
        &self,
        documents: &[Document],
    ) -> Result<Vec<TopicVector>, ExtractError> {
        Ok(documents
            .iter()
            .map(|document| TopicVector {
                source_text: document.text.clone(),
                scores: score_document(&document.text),
            })
            .collect())
    }
}
