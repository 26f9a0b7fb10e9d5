use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::services::{
    directory::errors::DirectoryError, github_org::errors::GitHubOrgError,
    oauth::github::errors::GitHubAuthError, oauth::slack::errors::SlackAuthError,
};

/// Plain-text responses. Callers of this service are browsers following
/// redirects, so bodies are short human-readable strings.
pub struct TextResponse;

impl TextResponse {
    pub fn success(msg: &str) -> impl IntoResponse {
        (StatusCode::OK, msg.to_string())
    }

    pub fn bad_request(msg: &str) -> impl IntoResponse {
        (StatusCode::BAD_REQUEST, msg.to_string())
    }

    pub fn unauthorized(msg: &str) -> impl IntoResponse {
        (StatusCode::UNAUTHORIZED, msg.to_string())
    }

    pub fn forbidden(msg: &str) -> impl IntoResponse {
        (StatusCode::FORBIDDEN, msg.to_string())
    }

    pub fn too_many_requests(msg: &str) -> impl IntoResponse {
        (StatusCode::TOO_MANY_REQUESTS, msg.to_string())
    }

    pub fn server_error() -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    }
}

/// A `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Failures that end a request with a 500. Invalid caller input never
/// becomes an `AppError`; handlers answer those with a 400 directly.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Slack(#[from] SlackAuthError),
    #[error(transparent)]
    GitHub(#[from] GitHubAuthError),
    #[error(transparent)]
    GitHubOrg(#[from] GitHubOrgError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        TextResponse::server_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;

    async fn body_text(resp: Response) -> String {
        let body = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn bad_request_is_plain_text() {
        let resp = TextResponse::bad_request("That's not a valid action").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
        assert_eq!(body_text(resp).await, "That's not a valid action");
    }

    #[tokio::test]
    async fn found_is_a_302_with_location() {
        let resp = found("https://members.example.com/profile");
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "https://members.example.com/profile"
        );
    }

    #[tokio::test]
    async fn app_error_hides_details_behind_500() {
        let resp =
            AppError::Directory(DirectoryError::MemberNotFound("jdoe".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(resp).await, "Internal Server Error");
    }
}
