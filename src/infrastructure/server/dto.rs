use crate::application::assistant::{ChatReply, ChatRequest};
use crate::types::ChatTurn;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatRequestBody {
    /// The user's new message
    pub message: String,
    /// Prior turns as `[user_text, assistant_text]` pairs, oldest first
    #[serde(default)]
    #[schema(value_type = Vec<Vec<String>>)]
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatResponseBody {
    pub response: String,
    #[schema(value_type = Vec<Vec<String>>)]
    pub chat_history: Vec<ChatTurn>,
}

impl From<ChatRequestBody> for ChatRequest {
    fn from(body: ChatRequestBody) -> Self {
        Self {
            message: body.message,
            chat_history: body.chat_history,
        }
    }
}

impl From<ChatReply> for ChatResponseBody {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.response,
            chat_history: reply.chat_history,
        }
    }
}
