// services/oauth/github/client.rs

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    Client,
};
use tracing::debug;

use super::{
    errors::GitHubAuthError,
    models::{GitHubToken, GitHubTokenResponse, GitHubUser},
    service::GitHubOAuthService,
};
use crate::config::GitHubSettings;

pub const GITHUB_WEB_BASE: &str = "https://github.com";
pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const GITHUB_API_ACCEPT: &str = "application/vnd.github.v3+json";
pub const GITHUB_USER_AGENT: &str = "eac-backend";

#[derive(Clone)]
pub struct GitHubOAuthClient {
    client: Client,
    client_id: String,
    client_secret: String,
    web_base: String,
    api_base: String,
}

impl GitHubOAuthClient {
    pub fn new(client: Client, settings: &GitHubSettings) -> Self {
        Self::with_bases(client, settings, GITHUB_WEB_BASE, GITHUB_API_BASE)
    }

    pub fn with_bases(
        client: Client,
        settings: &GitHubSettings,
        web_base: &str,
        api_base: &str,
    ) -> Self {
        Self {
            client,
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            web_base: web_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// Builds the URL that sends the user to GitHub to authorize this app.
pub fn authorize_url(client_id: &str, state: &str) -> String {
    format!(
        "{}?client_id={}&state={}",
        GITHUB_AUTHORIZE_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(state),
    )
}

#[async_trait]
impl GitHubOAuthService for GitHubOAuthClient {
    async fn exchange_code_for_token(&self, code: &str) -> Result<GitHubToken, GitHubAuthError> {
        let res = self
            .client
            .post(format!("{}/login/oauth/access_token", self.web_base))
            .header(ACCEPT, "application/json") // Needed to get JSON response instead of URL-encoded
            .header(USER_AGENT, GITHUB_USER_AGENT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await
            .map_err(GitHubAuthError::TokenExchangeFailed)?;

        let body: GitHubTokenResponse = res
            .json()
            .await
            .map_err(|_| GitHubAuthError::InvalidTokenJson)?;

        if let Some(error) = body.error {
            let reason = body.error_description.unwrap_or(error);
            debug!(%reason, "GitHub token endpoint returned an error");
            return Err(GitHubAuthError::TokenRejected(reason));
        }

        let access_token = body
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(GitHubAuthError::InvalidTokenJson)?;

        Ok(GitHubToken { access_token })
    }

    async fn fetch_user(&self, token: &GitHubToken) -> Result<GitHubUser, GitHubAuthError> {
        let user_resp = self
            .client
            .get(format!("{}/user", self.api_base))
            .header(AUTHORIZATION, format!("token {}", token.access_token))
            .header(ACCEPT, GITHUB_API_ACCEPT)
            .header(USER_AGENT, GITHUB_USER_AGENT)
            .send()
            .await
            .map_err(GitHubAuthError::UserInfoFetchFailed)?;

        let status = user_resp.status();
        if !status.is_success() {
            let body = user_resp.text().await.unwrap_or_default();
            return Err(GitHubAuthError::UnexpectedStatus {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        let user: GitHubUser = user_resp
            .json()
            .await
            .map_err(|_| GitHubAuthError::InvalidUserInfo)?;

        if user.login.is_empty() {
            return Err(GitHubAuthError::InvalidUserInfo);
        }
        Ok(user)
    }
}

/// Pulls GitHub's `message` field out of an error body, falling back to the raw text.
pub(crate) fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
