use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::{
    responses::{found, AppError, TextResponse},
    routes::auth::AuthSession,
    services::directory::models::MemberAttribute,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SlackLinkQuery {
    pub code: Option<String>,
}

/// Stores the Slack user id behind `code` on the signed-in member.
pub async fn link_slack(
    State(state): State<AppState>,
    session: AuthSession,
    Query(query): Query<SlackLinkQuery>,
) -> Result<Response, AppError> {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return Ok(TextResponse::bad_request("Missing code").into_response());
    };

    let identity = state.slack_oauth.exchange_code(&code).await?;
    let member = state.directory.get_member(session.username()).await?;
    state
        .directory
        .set_attribute(&member, MemberAttribute::SlackUid, Some(&identity.user_id))
        .await?;

    info!(
        uid = %member.uid,
        slack_uid = %identity.user_id,
        team = ?identity.team_id,
        "Linked Slack account"
    );
    Ok(found(&state.config.return_uri))
}

/// Clears the member's Slack user id. Succeeds whether or not one was set.
pub async fn revoke_slack(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Response, AppError> {
    let member = state.directory.get_member(session.username()).await?;
    state
        .directory
        .set_attribute(&member, MemberAttribute::SlackUid, None)
        .await?;

    info!(uid = %member.uid, previous = ?member.slack_uid, "Revoked Slack account");
    Ok(found(&state.config.return_uri))
}
