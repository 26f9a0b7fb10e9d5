// services/oidc/service.rs

use async_trait::async_trait;

use super::{
    errors::OidcError,
    models::{OidcToken, OidcUserInfo},
};

#[async_trait]
pub trait OidcService: Send + Sync {
    /// Where to send the browser to start the authorization code flow.
    fn authorization_url(&self, state: &str) -> String;
    async fn exchange_code(&self, code: &str) -> Result<OidcToken, OidcError>;
    async fn fetch_user_info(&self, token: &OidcToken) -> Result<OidcUserInfo, OidcError>;
}
