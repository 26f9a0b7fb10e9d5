use async_trait::async_trait;

use super::{
    errors::OidcError,
    models::{OidcToken, OidcUserInfo},
    service::OidcService,
};

#[derive(Default)]
pub struct MockOidc {
    pub user_info: OidcUserInfo,
    pub fail_exchange: bool,
}

impl MockOidc {
    pub fn for_user(username: &str) -> Self {
        Self {
            user_info: OidcUserInfo {
                sub: format!("sub-{}", username),
                preferred_username: Some(username.to_string()),
                name: None,
                email: None,
            },
            fail_exchange: false,
        }
    }
}

#[async_trait]
impl OidcService for MockOidc {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://sso.example.com/auth?state={}", state)
    }

    async fn exchange_code(&self, _code: &str) -> Result<OidcToken, OidcError> {
        if self.fail_exchange {
            return Err(OidcError::UnexpectedStatus {
                endpoint: "token",
                status: 400,
                message: "invalid_grant".into(),
            });
        }
        Ok(OidcToken {
            access_token: "oidc-access".into(),
        })
    }

    async fn fetch_user_info(&self, _token: &OidcToken) -> Result<OidcUserInfo, OidcError> {
        Ok(self.user_info.clone())
    }
}
