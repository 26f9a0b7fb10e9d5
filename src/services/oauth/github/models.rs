// services/oauth/github/models.rs
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GitHubCallback {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubActionQuery {
    pub action: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GitHubToken {
    pub access_token: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub id: Option<u64>,
}

/// Token endpoint body. GitHub answers 200 with `error` set when the code is bad.
#[derive(Debug, Deserialize)]
pub(crate) struct GitHubTokenResponse {
    pub(crate) access_token: Option<String>,
    pub(crate) error: Option<String>,
    pub(crate) error_description: Option<String>,
}
