//! Data models representing issue comments.

use serde::Deserialize;

/// A single comment on an issue, in the order GitHub returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Author login; empty when GitHub omits the user record.
    pub author: String,
    /// Comment body; empty when GitHub omits it.
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            author: value
                .user
                .and_then(|user| user.login)
                .unwrap_or_default(),
            body: value.body.unwrap_or_default(),
        }
    }
}
