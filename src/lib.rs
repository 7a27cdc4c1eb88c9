//! Commentary: a single-endpoint HTTP service that reports an issue's
//! comments together with topic scores.
//!
//! `GET /{owner}/{repo}/{issueNumber}` fetches the issue's comments from
//! the GitHub API, replays each comment through a request-scoped
//! broadcast channel, scores the comment bodies against a topic set, and
//! renders a combined plain-text report.

pub mod config;
pub mod github;
pub mod relay;
pub mod server;
pub mod telemetry;
pub mod topics;

pub use config::CommentaryConfig;
pub use github::{
    CommentGateway, FetchError, IssueComment, IssueLocator, OctocrabCommentGateway,
    PersonalAccessToken,
};
pub use relay::{RelayError, RelayEvent, ReplayChannel, Subscription};
pub use server::{AppState, ServerError, ServiceError};
pub use topics::{Document, ExtractError, KeywordTopicExtractor, TopicExtractor, TopicVector};
