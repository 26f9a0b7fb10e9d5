// services/github_org/client.rs

use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    Client, RequestBuilder,
};

use super::{
    errors::GitHubOrgError,
    models::{OrgMembershipAction, OrgMembershipOutcome},
    service::GitHubOrgService,
};
use crate::config::GitHubSettings;
use crate::services::oauth::github::client::{
    extract_message, GITHUB_API_ACCEPT, GITHUB_API_BASE, GITHUB_USER_AGENT,
};

/// Changes organization membership with the org admin token.
#[derive(Clone)]
pub struct GitHubOrgClient {
    client: Client,
    org: String,
    org_token: String,
    api_base: String,
}

impl GitHubOrgClient {
    pub fn new(client: Client, settings: &GitHubSettings) -> Self {
        Self::with_api_base(client, settings, GITHUB_API_BASE)
    }

    pub fn with_api_base(client: Client, settings: &GitHubSettings, api_base: &str) -> Self {
        Self {
            client,
            org: settings.org.clone(),
            org_token: settings.org_token.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Adding goes through `memberships` so GitHub sends an invitation;
    /// removal drops the member outright.
    pub(crate) fn membership_url(&self, action: OrgMembershipAction, login: &str) -> String {
        let collection = match action {
            OrgMembershipAction::Add => "memberships",
            OrgMembershipAction::Remove => "members",
        };
        format!(
            "{}/orgs/{}/{}/{}",
            self.api_base,
            urlencoding::encode(&self.org),
            collection,
            urlencoding::encode(login)
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("token {}", self.org_token))
            .header(ACCEPT, GITHUB_API_ACCEPT)
            .header(USER_AGENT, GITHUB_USER_AGENT)
    }

    async fn send(
        &self,
        action: OrgMembershipAction,
        login: &str,
        builder: RequestBuilder,
    ) -> Result<OrgMembershipOutcome, GitHubOrgError> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let membership_state = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value["state"].as_str().map(str::to_string));
        let message = (!status.is_success()).then(|| extract_message(&body));

        Ok(OrgMembershipOutcome {
            action,
            org: self.org.clone(),
            login: login.to_string(),
            status: status.as_u16(),
            membership_state,
            message,
        })
    }
}

#[async_trait]
impl GitHubOrgService for GitHubOrgClient {
    async fn add_member(&self, login: &str) -> Result<OrgMembershipOutcome, GitHubOrgError> {
        let url = self.membership_url(OrgMembershipAction::Add, login);
        self.send(OrgMembershipAction::Add, login, self.client.put(url))
            .await
    }

    async fn remove_member(&self, login: &str) -> Result<OrgMembershipOutcome, GitHubOrgError> {
        let url = self.membership_url(OrgMembershipAction::Remove, login);
        self.send(OrgMembershipAction::Remove, login, self.client.delete(url))
            .await
    }
}
