use axum::{
    extract::{Query, State},
    routing::post,
    Extension, Form, Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::{ApiResult, AppError},
    render::{self, SlackMessage},
    state::{AppState, RequestId},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/meeting-room", post(slash_command).get(plain_query))
        .with_state(state)
}

/// Slack slash-command payload; only `text` is used.
#[derive(Debug, Deserialize)]
struct SlashCommand {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct MeetingRoomQuery {
    #[serde(default)]
    text: String,
}

async fn slash_command(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(command): Form<SlashCommand>,
) -> ApiResult<Json<SlackMessage>> {
    info!(request_id = %request_id.0, text = %command.text, "meeting room command");

    let response = state
        .responder
        .retrieve(&command.text, state.directory.as_ref())
        .await
        .map_err(|err| AppError::from(err).with_request_id(&request_id.0))?;

    Ok(Json(render::slack_message(&response)))
}

async fn plain_query(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<MeetingRoomQuery>,
) -> ApiResult<String> {
    let response = state
        .responder
        .retrieve(&query.text, state.directory.as_ref())
        .await
        .map_err(|err| AppError::from(err).with_request_id(&request_id.0))?;

    Ok(render::plain_text(&response))
}

#[cfg(test)]
mod tests {
    use crate::routes::app;
    use crate::test_support::{body_json, body_text, state};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slash_command_room_lookup() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/meeting-room")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("token=abc&command=%2Fmeetingroom&text=Camino"))
            .unwrap();

        let response = app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let json = body_json(response).await;
        assert_eq!(json["response_type"], "in_channel");
        assert_eq!(
            json["text"],
            "Camino - Second floor, past the kitchen *Notes:* Badge required"
        );
        assert_eq!(json["attachments"][0]["title"], "Camino");
    }

    #[tokio::test]
    async fn test_slash_command_without_text_is_not_found() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/meeting-room")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("command=%2Fmeetingroom"))
            .unwrap();

        let response = app(state()).oneshot(request).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["text"], "Sorry, room not found.");
        assert!(json.get("attachments").is_none());
    }

    #[tokio::test]
    async fn test_plain_query_list() {
        let request = Request::builder()
            .uri("/v1/meeting-room?text=%20LIST%20")
            .body(Body::empty())
            .unwrap();

        let response = app(state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "```\n1. Camino\n2. Big Sur\n```");
    }

    #[tokio::test]
    async fn test_plain_query_inlines_image() {
        let request = Request::builder()
            .uri("/v1/meeting-room?text=camino")
            .body(Body::empty())
            .unwrap();

        let response = app(state()).oneshot(request).await.unwrap();
        let text = body_text(response).await;
        assert!(text.ends_with(" https://img.example/camino.png"));
    }
}
