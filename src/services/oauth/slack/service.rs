// services/oauth/slack/service.rs

use super::{errors::SlackAuthError, models::SlackIdentity};
use async_trait::async_trait;

#[async_trait]
pub trait SlackOAuthService: Send + Sync {
    /// Trades an authorization code for the identity of the Slack user who granted it.
    async fn exchange_code(&self, code: &str) -> Result<SlackIdentity, SlackAuthError>;
}
