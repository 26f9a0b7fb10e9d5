// services/github_org/service.rs

use async_trait::async_trait;

use super::{errors::GitHubOrgError, models::OrgMembershipOutcome};

/// Organization membership management. An `Ok` carries GitHub's answer
/// whatever its status; `Err` means no answer was received.
#[async_trait]
pub trait GitHubOrgService: Send + Sync {
    async fn add_member(&self, login: &str) -> Result<OrgMembershipOutcome, GitHubOrgError>;
    async fn remove_member(&self, login: &str) -> Result<OrgMembershipOutcome, GitHubOrgError>;
}
