//! Identity wrappers naming the issue whose comments are fetched.

use super::error::FetchError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, FetchError> {
        if value.is_empty() {
            return Err(FetchError::MissingRepositorySegment);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, FetchError> {
        if value.is_empty() {
            return Err(FetchError::MissingRepositorySegment);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueNumber(u64);

impl IssueNumber {
    pub(crate) const fn new(value: u64) -> Result<Self, FetchError> {
        if value == 0 {
            return Err(FetchError::InvalidIssueNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, FetchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FetchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Validated identity of the issue whose comments are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLocator {
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: IssueNumber,
}

impl IssueLocator {
    /// Builds a locator from raw owner, repository, and issue number values.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingRepositorySegment` when owner or
    /// repository is empty and `FetchError::InvalidIssueNumber` when the
    /// number is zero.
    pub fn from_parts(owner: &str, repository: &str, number: u64) -> Result<Self, FetchError> {
        Ok(Self {
            owner: RepositoryOwner::new(owner)?,
            repository: RepositoryName::new(repository)?,
            number: IssueNumber::new(number)?,
        })
    }

    /// Borrow the repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the issue number.
    #[must_use]
    pub const fn number(&self) -> IssueNumber {
        self.number
    }

    /// Relative API path listing the issue's comments.
    #[must_use]
    pub fn comments_path(&self) -> String {
        format!(
            "repos/{owner}/{repo}/issues/{number}/comments",
            owner = self.owner.as_str(),
            repo = self.repository.as_str(),
            number = self.number.get()
        )
    }
}
