use std::sync::Mutex;

use async_trait::async_trait;

use crate::services::oauth::github::{
    errors::GitHubAuthError,
    models::{GitHubToken, GitHubUser},
    service::GitHubOAuthService,
};

#[derive(Default)]
pub struct MockGitHubOAuth {
    pub token: GitHubToken,
    pub user: GitHubUser,
    pub codes: Mutex<Vec<String>>,
    pub fail_exchange: bool,
    pub fail_user: bool,
}

impl MockGitHubOAuth {
    pub fn with_login(login: &str) -> Self {
        Self {
            token: GitHubToken {
                access_token: "gho_test".into(),
            },
            user: GitHubUser {
                login: login.to_string(),
                id: Some(42),
            },
            codes: Mutex::new(Vec::new()),
            fail_exchange: false,
            fail_user: false,
        }
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubOAuthService for MockGitHubOAuth {
    async fn exchange_code_for_token(&self, code: &str) -> Result<GitHubToken, GitHubAuthError> {
        self.codes.lock().unwrap().push(code.to_string());
        if self.fail_exchange {
            return Err(GitHubAuthError::TokenRejected(
                "bad_verification_code".into(),
            ));
        }
        Ok(self.token.clone())
    }

    async fn fetch_user(&self, _token: &GitHubToken) -> Result<GitHubUser, GitHubAuthError> {
        if self.fail_user {
            return Err(GitHubAuthError::UnexpectedStatus {
                status: 401,
                message: "Bad credentials".into(),
            });
        }
        Ok(self.user.clone())
    }
}
