// services/oidc/errors.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OidcError {
    #[error("OIDC request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("OIDC {endpoint} endpoint responded with status {status}: {message}")]
    UnexpectedStatus {
        endpoint: &'static str,
        status: u16,
        message: String,
    },
    #[error("OIDC issuer mismatch: expected {expected}, provider reports {actual}")]
    IssuerMismatch { expected: String, actual: String },
    #[error("OIDC provider returned an invalid response: {0}")]
    InvalidResponse(String),
}
