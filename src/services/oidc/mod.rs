pub mod client;
pub mod errors;
#[cfg(test)]
pub mod mock_oidc;
pub mod models;
pub mod service;
