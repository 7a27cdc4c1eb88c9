//! Application configuration loaded from CLI, environment, and files.
//!
//! Values merge from command-line arguments, environment variables, and
//! configuration files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Lowest to highest:
//!
//! 1. **Defaults** – built-in application defaults
//! 2. **Configuration file** – `.commentary.toml` in the current
//!    directory, home directory, or XDG config directory
//! 3. **Environment variables** – `COMMENTARY_TOKEN` (or legacy
//!    `GITHUB_TOKEN`), `COMMENTARY_BIND`, `COMMENTARY_API_BASE`
//! 4. **Command-line arguments** – `--token`, `--bind`, `--api-base`

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::github::error::FetchError;
use crate::github::locator::PersonalAccessToken;

/// Listen address used when none is configured.
const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// GitHub API base used when none is configured.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Service configuration supporting CLI, environment, and file sources.
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "COMMENTARY",
    discovery(
        dotfile_name = ".commentary.toml",
        config_file_name = "commentary.toml",
        app_name = "commentary"
    )
)]
pub struct CommentaryConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `COMMENTARY_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Address the HTTP listener binds to.
    ///
    /// Can be provided via:
    /// - CLI: `--bind <ADDR>` or `-b <ADDR>`
    /// - Environment: `COMMENTARY_BIND`
    /// - Config file: `bind = "..."`
    ///
    /// Defaults to `127.0.0.1:8080`.
    #[ortho_config(cli_short = 'b')]
    pub bind: Option<String>,

    /// GitHub API base URL.
    ///
    /// Override for GitHub Enterprise hosts or tests. Defaults to
    /// `https://api.github.com`.
    #[ortho_config()]
    pub api_base: Option<String>,
}

impl CommentaryConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingToken`] when no token source provides
    /// a non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, FetchError> {
        let value = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(FetchError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Returns the configured listen address or the default.
    #[must_use]
    pub fn bind_address(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    /// Returns the configured API base URL or the default.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] when the configured value does
    /// not parse as a URL.
    pub fn api_base(&self) -> Result<Url, FetchError> {
        let raw = self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE);
        Url::parse(raw).map_err(|error| FetchError::InvalidUrl(error.to_string()))
    }
}
