// services/oauth/slack/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackAuthError {
    #[error("Slack token exchange failed: {0}")]
    TokenExchangeFailed(#[from] reqwest::Error),
    #[error("Slack rejected the authorization code: {0}")]
    Rejected(String),
    #[error("Slack response is missing user.id")]
    MissingUserId,
}
