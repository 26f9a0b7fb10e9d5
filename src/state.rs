use crate::config::Config;
use crate::services::{
    directory::service::MemberDirectory,
    github_org::service::GitHubOrgService,
    oauth::{github::service::GitHubOAuthService, slack::service::SlackOAuthService},
    oidc::service::OidcService,
};
use crate::utils::jwt::JwtKeys;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session_keys: Arc<JwtKeys>,
    pub oidc: Arc<dyn OidcService>,
    pub directory: Arc<dyn MemberDirectory>,
    pub slack_oauth: Arc<dyn SlackOAuthService>,
    pub github_oauth: Arc<dyn GitHubOAuthService>,
    pub github_org: Arc<dyn GitHubOrgService>,
}
