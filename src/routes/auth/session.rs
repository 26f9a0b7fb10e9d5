use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Method},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    responses::{found, TextResponse},
    routes::auth::claims::SessionClaims,
    session::read_session,
    state::AppState,
};

/// Gate for account-link handlers: only requests carrying a valid session get through.
#[derive(Debug, PartialEq)]
pub struct AuthSession(pub SessionClaims);

impl AuthSession {
    pub fn username(&self) -> &str {
        &self.0.preferred_username
    }
}

#[derive(Debug, PartialEq)]
pub enum AuthRejection {
    /// A navigable request; send the browser through login and back.
    LoginRequired { next: String },
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRequired { next } => {
                found(&format!("/auth/login?next={}", urlencoding::encode(&next)))
            }
            AuthRejection::Unauthorized => TextResponse::unauthorized("Unauthorized").into_response(),
        }
    }
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(claims) = read_session(&jar, &state.config, &state.session_keys) {
            return Ok(AuthSession(claims));
        }

        // Redirecting anything but a GET would replay it as a GET after login.
        if parts.method == Method::GET {
            let next = parts
                .uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string());
            Err(AuthRejection::LoginRequired { next })
        } else {
            Err(AuthRejection::Unauthorized)
        }
    }
}
