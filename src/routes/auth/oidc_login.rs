use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{
    responses::{found, TextResponse},
    session::{clear_session, issue_session, SessionError},
    state::AppState,
    utils::csrf::{build_state_cookie, expired_cookie, generate_csrf_token},
};

pub const OIDC_STATE_COOKIE: &str = "eac_oidc_state";
pub const NEXT_COOKIE: &str = "eac_next";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Only same-origin paths are followed after login; anything else lands on `/`.
pub(crate) fn safe_next(raw: Option<&str>) -> String {
    match raw {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

/// Starts the authorization code flow against the identity provider.
pub async fn oidc_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    let state_token = generate_csrf_token();
    let next = safe_next(query.next.as_deref());
    let secure = state.config.auth_cookie_secure;

    let jar = jar
        .add(build_state_cookie(OIDC_STATE_COOKIE, &state_token, secure))
        .add(build_state_cookie(
            NEXT_COOKIE,
            &urlencoding::encode(&next),
            secure,
        ));

    (jar, found(&state.oidc.authorization_url(&state_token))).into_response()
}

pub async fn oidc_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    if let Some(err) = params.error.or(params.error_description) {
        warn!(error = %err, "Identity provider returned an error");
        return TextResponse::unauthorized(&format!("Login failed: {}", err)).into_response();
    }

    let Some(expected_state) = jar.get(OIDC_STATE_COOKIE).map(|c| c.value().to_string()) else {
        return TextResponse::bad_request("Missing state").into_response();
    };
    if params.state.as_deref() != Some(expected_state.as_str()) {
        return TextResponse::bad_request("Invalid state").into_response();
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return TextResponse::bad_request("Missing code").into_response();
    };

    let next = jar
        .get(NEXT_COOKIE)
        .and_then(|c| urlencoding::decode(c.value()).ok().map(|v| v.into_owned()))
        .map(|raw| safe_next(Some(&raw)))
        .unwrap_or_else(|| "/".to_string());

    let secure = state.config.auth_cookie_secure;
    let jar = jar
        .add(expired_cookie(OIDC_STATE_COOKIE, secure))
        .add(expired_cookie(NEXT_COOKIE, secure));

    let token = match state.oidc.exchange_code(&code).await {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "OIDC token exchange failed");
            return (jar, TextResponse::server_error()).into_response();
        }
    };

    let user_info = match state.oidc.fetch_user_info(&token).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "OIDC userinfo request failed");
            return (jar, TextResponse::server_error()).into_response();
        }
    };

    let session_cookie = match issue_session(&state.config, &state.session_keys, &user_info) {
        Ok(cookie) => cookie,
        Err(SessionError::MissingUsername) => {
            warn!(sub = %user_info.sub, "Identity has no preferred_username");
            return (jar, TextResponse::forbidden("No username on this account")).into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to issue session");
            return (jar, TextResponse::server_error()).into_response();
        }
    };

    info!(sub = %user_info.sub, username = ?user_info.preferred_username, "User signed in");
    (jar.add(session_cookie), found(&next)).into_response()
}

pub async fn oidc_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.add(clear_session(&state.config));
    (jar, found(&state.config.return_uri)).into_response()
}
