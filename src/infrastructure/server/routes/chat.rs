use super::super::dto::{ChatRequestBody, ChatResponseBody};
use super::super::state::ServerState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::info;

/// Failures inside the pipeline still answer 200 with an apology and the
/// unchanged history.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Reply and updated chat history", body = ChatResponseBody)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<ChatRequestBody>,
) -> Json<ChatResponseBody> {
    info!(
        history = payload.chat_history.len(),
        "Received /chat request"
    );
    let reply = state.assistant().respond(payload.into()).await;
    Json(reply.into())
}
