// services/github_org/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubOrgError {
    #[error("GitHub organization request failed: {0}")]
    Http(#[from] reqwest::Error),
}
