use crate::constants::NO_RESPONSE_FALLBACK;
use crate::types::{ChatTurn, Message};

/// Everything one chat request threads through the loop. Built fresh per
/// request from the caller's history and dropped once the reply is sent.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<Message>,
    calendar_id: String,
}

impl ConversationState {
    pub fn new(calendar_id: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            calendar_id: calendar_id.into(),
        }
    }

    pub fn from_history(
        system: Option<String>,
        history: &[ChatTurn],
        message: &str,
        calendar_id: impl Into<String>,
    ) -> Self {
        let mut state = Self::new(calendar_id);
        if let Some(system) = system {
            state.push(Message::system(system));
        }
        for turn in history {
            state.push(Message::user(turn.user()));
            state.push(Message::assistant(turn.assistant()));
        }
        state.push(Message::user(message));
        state
    }

    /// History only grows.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// Raw result of the current turn: the closing assistant text, else the
    /// latest tool output, else a fixed fallback.
    pub fn terminal_content(&self) -> String {
        let turn_start = self
            .messages
            .iter()
            .rposition(|m| matches!(m, Message::User { .. }))
            .map_or(0, |i| i + 1);
        let turn = &self.messages[turn_start..];

        if let Some(Message::Assistant { content, tool_calls }) = turn.last() {
            if tool_calls.is_empty() && !content.trim().is_empty() {
                return content.clone();
            }
        }

        turn.iter()
            .rev()
            .find_map(|m| match m {
                Message::Tool { content, .. } => Some(content.clone()),
                _ => None,
            })
            .unwrap_or_else(|| NO_RESPONSE_FALLBACK.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageRole, ToolCallRequest};
    use serde_json::json;

    #[test]
    fn history_is_replayed_before_the_new_message() {
        let history = vec![ChatTurn::new("hi", "hello"), ChatTurn::new("who?", "me")];
        let state = ConversationState::from_history(Some("sys".into()), &history, "next", "primary");

        let roles: Vec<MessageRole> = state.messages().iter().map(Message::role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert_eq!(state.messages().last().map(Message::content), Some("next"));
        assert_eq!(state.calendar_id(), "primary");
    }

    #[test]
    fn terminal_content_prefers_final_text() {
        let mut state = ConversationState::from_history(None, &[], "list", "primary");
        state.push(Message::assistant_with_calls(
            "",
            vec![ToolCallRequest::new("c1", "list_calendar_events", json!({}))],
        ));
        state.push(Message::tool("c1", "list_calendar_events", r#"{"status":"success"}"#));
        assert_eq!(state.terminal_content(), r#"{"status":"success"}"#);

        state.push(Message::assistant("You have one event."));
        assert_eq!(state.terminal_content(), "You have one event.");
    }

    #[test]
    fn terminal_content_ignores_earlier_turns() {
        let history = vec![ChatTurn::new("before", "old answer")];
        let mut state = ConversationState::from_history(None, &history, "now", "primary");
        state.push(Message::assistant(""));
        assert_eq!(state.terminal_content(), NO_RESPONSE_FALLBACK);
    }
}
