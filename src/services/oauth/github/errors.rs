// services/oauth/github/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubAuthError {
    #[error("GitHub token exchange failed: {0}")]
    TokenExchangeFailed(reqwest::Error),
    #[error("GitHub rejected the authorization code: {0}")]
    TokenRejected(String),
    #[error("Invalid GitHub token response")]
    InvalidTokenJson,
    #[error("Failed to fetch GitHub user info: {0}")]
    UserInfoFetchFailed(reqwest::Error),
    #[error("GitHub responded with status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
    #[error("Invalid GitHub user info")]
    InvalidUserInfo,
}
