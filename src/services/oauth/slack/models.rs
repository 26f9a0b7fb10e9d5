// services/oauth/slack/models.rs
use serde::Deserialize;

/// Body of Slack's `oauth.access` response. Only the fields this service
/// reads are modelled.
#[derive(Debug, Deserialize)]
pub struct SlackAccessResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user: Option<SlackUser>,
    #[serde(default)]
    pub team: Option<SlackTeam>,
}

#[derive(Debug, Deserialize)]
pub struct SlackUser {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SlackTeam {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlackIdentity {
    pub user_id: String,
    pub team_id: Option<String>,
}
