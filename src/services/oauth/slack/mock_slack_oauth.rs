use std::sync::Mutex;

use async_trait::async_trait;

use crate::services::oauth::slack::{
    errors::SlackAuthError, models::SlackIdentity, service::SlackOAuthService,
};

#[derive(Default)]
pub struct MockSlackOAuth {
    pub identity: Option<SlackIdentity>,
    pub codes: Mutex<Vec<String>>,
}

impl MockSlackOAuth {
    pub fn returning(user_id: &str) -> Self {
        Self {
            identity: Some(SlackIdentity {
                user_id: user_id.to_string(),
                team_id: None,
            }),
            codes: Mutex::new(Vec::new()),
        }
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlackOAuthService for MockSlackOAuth {
    async fn exchange_code(&self, code: &str) -> Result<SlackIdentity, SlackAuthError> {
        self.codes.lock().unwrap().push(code.to_string());
        self.identity.clone().ok_or(SlackAuthError::MissingUserId)
    }
}
