use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    errors::GitHubOrgError,
    models::{OrgMembershipAction, OrgMembershipOutcome},
    service::GitHubOrgService,
};

/// Records calls and answers every one with `status`, or with a transport
/// error when `unreachable` is set.
pub struct MockGitHubOrg {
    pub org: String,
    pub status: u16,
    pub unreachable: bool,
    pub calls: Mutex<Vec<(OrgMembershipAction, String)>>,
}

impl Default for MockGitHubOrg {
    fn default() -> Self {
        Self::with_status(200)
    }
}

impl MockGitHubOrg {
    pub fn with_status(status: u16) -> Self {
        Self {
            org: "ExampleOrg".into(),
            status,
            unreachable: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(OrgMembershipAction, String)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        action: OrgMembershipAction,
        login: &str,
    ) -> Result<OrgMembershipOutcome, GitHubOrgError> {
        self.calls.lock().unwrap().push((action, login.to_string()));
        if self.unreachable {
            // An unparsable URL yields a real reqwest error without touching the network.
            let err = reqwest::Client::new()
                .get("http://[unreachable")
                .build()
                .unwrap_err();
            return Err(GitHubOrgError::Http(err));
        }
        Ok(OrgMembershipOutcome {
            action,
            org: self.org.clone(),
            login: login.to_string(),
            status: self.status,
            membership_state: None,
            message: (!(200..300).contains(&self.status)).then(|| "Forbidden".to_string()),
        })
    }
}

#[async_trait]
impl GitHubOrgService for MockGitHubOrg {
    async fn add_member(&self, login: &str) -> Result<OrgMembershipOutcome, GitHubOrgError> {
        self.record(OrgMembershipAction::Add, login)
    }

    async fn remove_member(&self, login: &str) -> Result<OrgMembershipOutcome, GitHubOrgError> {
        self.record(OrgMembershipAction::Remove, login)
    }
}
