use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Form, Json, Router,
};
use chrono::{DateTime, Utc};
use roombot_core::{queue::DEFAULT_RANK, types::QueueMembership, StoreError};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiError, ApiResult, AppError},
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/queues/join", post(join))
        .route("/v1/queues/active", get(list_active))
        .route("/v1/queues/{channel_id}/active", get(list_channel_active))
        .with_state(state)
}

/// Slack slash-command fields identifying the channel and the caller.
#[derive(Debug, Deserialize)]
struct JoinRequest {
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    channel_name: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    user_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MembershipItem {
    id: String,
    channel_id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MembershipListResponse {
    items: Vec<MembershipItem>,
}

impl MembershipItem {
    fn new(membership: QueueMembership, position: Option<usize>) -> Self {
        Self {
            id: membership.id,
            channel_id: membership.channel_id,
            user_id: membership.user_id,
            created_at: membership.created_at,
            position,
        }
    }
}

fn reject(request_id: &RequestId) -> impl Fn(StoreError) -> ApiError + '_ {
    move |err| AppError::from(err).with_request_id(&request_id.0)
}

async fn join(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(payload): Form<JoinRequest>,
) -> ApiResult<Json<MembershipItem>> {
    let reject = reject(&request_id);

    let channel = state
        .queues
        .register_channel(&payload.channel_id, &payload.channel_name)
        .await
        .map_err(&reject)?;
    let user = state
        .queues
        .register_user(&payload.user_id, &payload.user_name, DEFAULT_RANK)
        .await
        .map_err(&reject)?;

    let membership = match state.queues.join(&channel.id, &user.id).await {
        Ok(membership) => membership,
        Err(StoreError::UniquenessViolation { .. }) => {
            let active = state
                .queues
                .is_active_member(&channel.id, &user.id)
                .await
                .map_err(&reject)?;
            let message = if active {
                format!("{} is already in the {} queue", user.display_name, channel.name)
            } else {
                format!(
                    "{} already joined the {} queue before the daily reset",
                    user.display_name, channel.name
                )
            };
            return Err(AppError::Conflict(message).with_request_id(&request_id.0));
        }
        Err(err) => return Err(reject(err)),
    };

    let position = state
        .queues
        .active_for_channel(&channel.id)
        .await
        .map_err(&reject)?
        .iter()
        .position(|m| m.id == membership.id)
        .map(|idx| idx + 1);

    Ok(Json(MembershipItem::new(membership, position)))
}

async fn list_active(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> ApiResult<Json<MembershipListResponse>> {
    let items = state
        .queues
        .active()
        .await
        .map_err(reject(&request_id))?
        .into_iter()
        .map(|m| MembershipItem::new(m, None))
        .collect();

    Ok(Json(MembershipListResponse { items }))
}

async fn list_channel_active(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(channel_id): Path<String>,
) -> ApiResult<Json<MembershipListResponse>> {
    let items = state
        .queues
        .active_for_channel(&channel_id)
        .await
        .map_err(reject(&request_id))?
        .into_iter()
        .enumerate()
        .map(|(idx, m)| MembershipItem::new(m, Some(idx + 1)))
        .collect();

    Ok(Json(MembershipListResponse { items }))
}
