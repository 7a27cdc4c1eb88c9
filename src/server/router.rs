//! Single-endpoint route matching.
//!
//! The service deliberately owns route matching instead of delegating it
//! to the HTTP framework: the only endpoint is
//! `GET /{owner}/{repo}/{issueNumber}`, and anything else must map onto
//! the 404/400 taxonomy below rather than a framework default.

use http::Method;
use thiserror::Error;

/// Routing failures, each tied to a fixed HTTP outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Wrong method or a path that does not have three segments.
    #[error("unknown route")]
    NotFound,
    /// Three segments, but owner/repo empty or a non-numeric issue number.
    #[error("invalid request parameters")]
    InvalidParameters,
}

/// Validated decomposition of a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Repository owner segment.
    pub owner: String,
    /// Repository name segment.
    pub repo: String,
    /// Issue number parsed from the third segment.
    pub issue_number: u64,
}

/// Matches a request against the single `GET /{owner}/{repo}/{issue}`
/// endpoint.
///
/// One trailing slash is tolerated on an otherwise complete path. An
/// empty segment still counts towards the segment total, so `/a//3` is a
/// three-segment path with an empty repo and yields `InvalidParameters`.
///
/// # Errors
///
/// Returns [`RouteError::NotFound`] for non-GET methods or any other
/// segment count, and [`RouteError::InvalidParameters`] when owner or
/// repo is empty or the issue number is not a positive base-10 integer.
pub fn route(method: &Method, path: &str) -> Result<Route, RouteError> {
    if method != Method::GET {
        return Err(RouteError::NotFound);
    }

    let relative = path.strip_prefix('/').ok_or(RouteError::NotFound)?;
    let mut segments: Vec<&str> = relative.split('/').collect();
    if segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }

    let [owner, repo, number] = segments.as_slice() else {
        return Err(RouteError::NotFound);
    };

    if owner.is_empty() || repo.is_empty() {
        return Err(RouteError::InvalidParameters);
    }

    let issue_number: u64 = number
        .parse()
        .map_err(|_| RouteError::InvalidParameters)?;
    if issue_number == 0 {
        return Err(RouteError::InvalidParameters);
    }

    Ok(Route {
        owner: (*owner).to_owned(),
        repo: (*repo).to_owned(),
        issue_number,
    })
}
