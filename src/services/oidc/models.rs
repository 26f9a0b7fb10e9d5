// services/oidc/models.rs
use serde::Deserialize;

/// The subset of `/.well-known/openid-configuration` used for the code flow.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OidcToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OidcUserInfo {
    pub sub: String,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
