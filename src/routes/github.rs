use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    config::Config,
    responses::{found, AppError, TextResponse},
    routes::auth::AuthSession,
    services::{
        directory::models::MemberAttribute,
        oauth::github::{
            client::authorize_url,
            models::{GitHubActionQuery, GitHubCallback},
        },
    },
    state::AppState,
};

/// What the user asked for before being sent to GitHub. It survives the
/// redirect only as one of the two configured state strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubAction {
    Link,
    Revoke,
}

impl GitHubAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "link" => Some(GitHubAction::Link),
            "revoke" => Some(GitHubAction::Revoke),
            _ => None,
        }
    }

    pub fn state_token(self, config: &Config) -> &str {
        match self {
            GitHubAction::Link => &config.github.link_state,
            GitHubAction::Revoke => &config.github.revoke_state,
        }
    }

    pub fn from_state(state: &str, config: &Config) -> Option<Self> {
        if state == config.github.link_state {
            Some(GitHubAction::Link)
        } else if state == config.github.revoke_state {
            Some(GitHubAction::Revoke)
        } else {
            None
        }
    }
}

pub async fn github_home(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(query): Query<GitHubActionQuery>,
) -> Response {
    let Some(action) = query.action.as_deref().and_then(GitHubAction::parse) else {
        return TextResponse::bad_request("That's not a valid action").into_response();
    };

    found(&authorize_url(
        &state.config.github.client_id,
        action.state_token(&state.config),
    ))
}

pub async fn github_return(
    State(state): State<AppState>,
    session: AuthSession,
    Query(params): Query<GitHubCallback>,
) -> Result<Response, AppError> {
    let Some(action) = params
        .state
        .as_deref()
        .and_then(|s| GitHubAction::from_state(s, &state.config))
    else {
        return Ok(TextResponse::bad_request("Invalid state").into_response());
    };
    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Ok(TextResponse::bad_request("Missing code").into_response());
    };

    let token = state.github_oauth.exchange_code_for_token(&code).await?;
    let user = state.github_oauth.fetch_user(&token).await?;
    let member = state.directory.get_member(session.username()).await?;

    let outcome = match action {
        GitHubAction::Link => state.github_org.add_member(&user.login).await?,
        GitHubAction::Revoke => state.github_org.remove_member(&user.login).await?,
    };
    if outcome.is_success() {
        info!(
            action = %outcome.action,
            org = %outcome.org,
            login = %outcome.login,
            status = outcome.status,
            membership_state = ?outcome.membership_state,
            "GitHub organization membership updated"
        );
    } else {
        warn!(
            action = %outcome.action,
            org = %outcome.org,
            login = %outcome.login,
            uid = %member.uid,
            status = outcome.status,
            github_message = outcome.message.as_deref().unwrap_or(""),
            "GitHub organization rejected membership change; directory will still be updated"
        );
    }

    let value = match action {
        GitHubAction::Link => Some(user.login.as_str()),
        GitHubAction::Revoke => None,
    };
    state
        .directory
        .set_attribute(&member, MemberAttribute::GitHub, value)
        .await?;

    info!(
        uid = %member.uid,
        login = %user.login,
        github_id = ?user.id,
        ?action,
        "GitHub account updated"
    );
    Ok(TextResponse::success("Success").into_response())
}
