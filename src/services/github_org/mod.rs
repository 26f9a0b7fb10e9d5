pub mod client;
pub mod errors;
#[cfg(test)]
pub mod mock_github_org;
pub mod models;
pub mod service;
