pub mod directory;
pub mod github_org;
pub mod oauth;
pub mod oidc;
