// services/oidc/client.rs

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response, Url};
use tracing::info;

use super::{
    errors::OidcError,
    models::{OidcToken, OidcUserInfo, ProviderMetadata},
    service::OidcService,
};
use crate::config::OidcSettings;

pub const OIDC_SCOPES: &str = "openid profile email";

#[derive(Clone)]
pub struct OidcClient {
    client: Client,
    settings: OidcSettings,
    authorization_endpoint: Url,
    token_endpoint: String,
    userinfo_endpoint: String,
}

impl OidcClient {
    /// Fetches the provider metadata for the configured issuer.
    pub async fn discover(client: Client, settings: OidcSettings) -> Result<Self, OidcError> {
        let discovery_url = format!("{}/.well-known/openid-configuration", settings.issuer);
        let response = client
            .get(&discovery_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let metadata: ProviderMetadata = ensure_success("discovery", response).await?.json().await?;

        if metadata.issuer.trim_end_matches('/') != settings.issuer {
            return Err(OidcError::IssuerMismatch {
                expected: settings.issuer.clone(),
                actual: metadata.issuer,
            });
        }

        let client = Self::from_metadata(client, settings, metadata)?;
        info!(issuer = %client.settings.issuer, "OIDC provider discovered");
        Ok(client)
    }

    pub fn from_metadata(
        client: Client,
        settings: OidcSettings,
        metadata: ProviderMetadata,
    ) -> Result<Self, OidcError> {
        let authorization_endpoint = Url::parse(&metadata.authorization_endpoint).map_err(|err| {
            OidcError::InvalidResponse(format!("authorization_endpoint: {}", err))
        })?;

        Ok(Self {
            client,
            settings,
            authorization_endpoint,
            token_endpoint: metadata.token_endpoint,
            userinfo_endpoint: metadata.userinfo_endpoint,
        })
    }
}

async fn ensure_success(endpoint: &'static str, response: Response) -> Result<Response, OidcError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(OidcError::UnexpectedStatus {
        endpoint,
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl OidcService for OidcClient {
    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.authorization_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", OIDC_SCOPES)
            .append_pair("state", state);
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<OidcToken, OidcError> {
        let response = self
            .client
            .post(&self.token_endpoint)
            .header(ACCEPT, "application/json")
            .basic_auth(&self.settings.client_id, Some(&self.settings.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let token: OidcToken = ensure_success("token", response).await?.json().await?;
        if token.access_token.is_empty() {
            return Err(OidcError::InvalidResponse("empty access_token".into()));
        }
        Ok(token)
    }

    async fn fetch_user_info(&self, token: &OidcToken) -> Result<OidcUserInfo, OidcError> {
        let response = self
            .client
            .get(&self.userinfo_endpoint)
            .bearer_auth(&token.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Ok(ensure_success("userinfo", response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };
    use serde_json::json;

    fn settings(issuer: &str) -> OidcSettings {
        OidcSettings {
            issuer: issuer.to_string(),
            client_id: "eac".into(),
            client_secret: "oidc-secret".into(),
            redirect_uri: "http://localhost:8080/auth/callback".into(),
        }
    }

    async fn discovered(server: &MockServer) -> OidcClient {
        let issuer = server.url("/realms/members");
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/realms/members/.well-known/openid-configuration");
                then.status(200).json_body(json!({
                    "issuer": issuer,
                    "authorization_endpoint": server.url("/realms/members/auth"),
                    "token_endpoint": server.url("/realms/members/token"),
                    "userinfo_endpoint": server.url("/realms/members/userinfo"),
                    "jwks_uri": server.url("/realms/members/certs")
                }));
            })
            .await;

        OidcClient::discover(Client::new(), settings(&issuer))
            .await
            .expect("discovery")
    }

    #[tokio::test]
    async fn authorization_url_includes_code_flow_parameters() {
        let server = MockServer::start_async().await;
        let client = discovered(&server).await;

        let url = Url::parse(&client.authorization_url("state-123")).unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert!(url.as_str().starts_with(&server.url("/realms/members/auth")));
        assert_eq!(pairs["client_id"], "eac");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["scope"], OIDC_SCOPES);
        assert_eq!(pairs["state"], "state-123");
        assert_eq!(pairs["redirect_uri"], "http://localhost:8080/auth/callback");
    }

    #[tokio::test]
    async fn exchange_and_userinfo_round_trip() {
        let server = MockServer::start_async().await;
        let client = discovered(&server).await;

        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/realms/members/token")
                    .body_contains("grant_type=authorization_code")
                    .body_contains("code=xyz");
                then.status(200).json_body(json!({
                    "access_token": "at-1",
                    "id_token": "header.payload.sig",
                    "token_type": "Bearer"
                }));
            })
            .await;
        let userinfo_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/realms/members/userinfo")
                    .header("authorization", "Bearer at-1");
                then.status(200).json_body(json!({
                    "sub": "f00",
                    "preferred_username": "jdoe",
                    "email": "jdoe@example.com"
                }));
            })
            .await;

        let token = client.exchange_code("xyz").await.expect("token");
        let info = client.fetch_user_info(&token).await.expect("userinfo");

        token_mock.assert_async().await;
        userinfo_mock.assert_async().await;
        assert_eq!(info.preferred_username.as_deref(), Some("jdoe"));
        assert_eq!(info.email.as_deref(), Some("jdoe@example.com"));
    }

    #[tokio::test]
    async fn rejected_code_reports_token_endpoint_status() {
        let server = MockServer::start_async().await;
        let client = discovered(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/realms/members/token");
                then.status(400).body("{\"error\":\"invalid_grant\"}");
            })
            .await;

        let err = client.exchange_code("used").await.unwrap_err();
        match err {
            OidcError::UnexpectedStatus {
                endpoint, status, ..
            } => {
                assert_eq!(endpoint, "token");
                assert_eq!(status, 400);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn discovery_rejects_foreign_issuer() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/.well-known/openid-configuration");
                then.status(200).json_body(json!({
                    "issuer": "https://evil.example.com",
                    "authorization_endpoint": "https://evil.example.com/auth",
                    "token_endpoint": "https://evil.example.com/token",
                    "userinfo_endpoint": "https://evil.example.com/userinfo"
                }));
            })
            .await;

        let result = OidcClient::discover(Client::new(), settings(&server.base_url())).await;
        assert!(matches!(result, Err(OidcError::IssuerMismatch { .. })));
    }
}
