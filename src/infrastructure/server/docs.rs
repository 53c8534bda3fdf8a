use super::dto::{ChatRequestBody, ChatResponseBody};
use super::routes;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Calendar Booking AI Agent"),
    paths(routes::chat::chat_handler, routes::index::index_handler),
    components(schemas(ChatRequestBody, ChatResponseBody)),
    tags(
        (name = "chat", description = "Conversational calendar booking"),
        (name = "meta", description = "Service information")
    )
)]
pub(super) struct ApiDoc;
