// services/oauth/slack/client.rs

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{
    errors::SlackAuthError,
    models::{SlackAccessResponse, SlackIdentity},
    service::SlackOAuthService,
};
use crate::config::OAuthProviderConfig;

pub const SLACK_API_BASE: &str = "https://slack.com/api";

#[derive(Clone)]
pub struct SlackOAuthClient {
    client: Client,
    settings: OAuthProviderConfig,
    api_base: String,
}

impl SlackOAuthClient {
    pub fn new(client: Client, settings: OAuthProviderConfig) -> Self {
        Self::with_api_base(client, settings, SLACK_API_BASE)
    }

    pub fn with_api_base(client: Client, settings: OAuthProviderConfig, api_base: &str) -> Self {
        Self {
            client,
            settings,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SlackOAuthService for SlackOAuthClient {
    async fn exchange_code(&self, code: &str) -> Result<SlackIdentity, SlackAuthError> {
        let body: SlackAccessResponse = self
            .client
            .get(format!("{}/oauth.access", self.api_base))
            .query(&[
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("client_id", self.settings.client_id.as_str()),
                ("client_secret", self.settings.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await?
            .json()
            .await?;

        if body.ok == Some(false) {
            let reason = body.error.unwrap_or_else(|| "unknown_error".to_string());
            debug!(%reason, "Slack oauth.access returned ok=false");
            return Err(SlackAuthError::Rejected(reason));
        }

        let user_id = body
            .user
            .and_then(|user| user.id)
            .filter(|id| !id.is_empty())
            .ok_or(SlackAuthError::MissingUserId)?;

        Ok(SlackIdentity {
            user_id,
            team_id: body.team.and_then(|team| team.id),
        })
    }
}
