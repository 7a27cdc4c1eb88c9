//! GitHub issue-comment intake.
//!
//! This module wraps Octocrab to validate issue coordinates and retrieve the
//! comments on an issue. Errors are mapped into domain variants so that
//! callers can log precise failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::FetchError;
pub use gateway::{CommentGateway, OctocrabCommentGateway};
pub use locator::{
    IssueLocator, IssueNumber, PersonalAccessToken, RepositoryName, RepositoryOwner,
};
pub use models::IssueComment;

#[cfg(test)]
pub use gateway::MockCommentGateway;
