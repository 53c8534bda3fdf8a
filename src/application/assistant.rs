//! The chat pipeline shared by every front end.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::agent::{Agent, AgentError, AgentOptions, ConversationState, Instructions};
use super::presentation::Presenter;
use super::tools::ToolDispatcher;
use crate::config::AppConfig;
use crate::constants::APOLOGY_MESSAGE;
use crate::model::ModelProvider;
use crate::types::ChatTurn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub chat_history: Vec<ChatTurn>,
}

/// Successful run: the user-facing text and the raw content recorded in history.
#[derive(Debug, Clone)]
pub struct Completion {
    pub response: String,
    pub raw: String,
}

pub struct SchedulingAssistant {
    agent: Agent,
    presenter: Presenter,
    instructions: Instructions,
    options: AgentOptions,
    calendar_id: String,
}

impl SchedulingAssistant {
    pub fn new(
        model: Arc<dyn ModelProvider>,
        dispatcher: ToolDispatcher,
        instructions: Instructions,
        options: AgentOptions,
    ) -> Self {
        let calendar_id = dispatcher.calendar_id().to_string();
        Self {
            presenter: Presenter::new(model.clone(), &options),
            agent: Agent::new(model, dispatcher),
            instructions,
            options,
            calendar_id,
        }
    }

    pub fn from_config(
        config: &AppConfig,
        model: Arc<dyn ModelProvider>,
        dispatcher: ToolDispatcher,
    ) -> Self {
        let instructions =
            Instructions::new(config.calendar.time_zone.clone(), config.system_prompt.clone());
        Self::new(model, dispatcher, instructions, AgentOptions::from_config(config))
    }

    /// Never fails: a broken pipeline yields the apology and the caller's
    /// history unchanged, so the same turn can be retried.
    pub async fn respond(&self, request: ChatRequest) -> ChatReply {
        let ChatRequest {
            message,
            mut chat_history,
        } = request;
        info!(history = chat_history.len(), "Received chat message");

        match self.complete(&message, &chat_history).await {
            Ok(completion) => {
                chat_history.push(ChatTurn::new(message, completion.raw));
                ChatReply {
                    response: completion.response,
                    chat_history,
                }
            }
            Err(err) => {
                error!(error = %err, "Chat pipeline failed");
                ChatReply {
                    response: APOLOGY_MESSAGE.to_string(),
                    chat_history,
                }
            }
        }
    }

    pub async fn complete(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<Completion, AgentError> {
        let system = self
            .instructions
            .compose(&self.calendar_id, Local::now().fixed_offset());
        let mut state =
            ConversationState::from_history(Some(system), history, message, &self.calendar_id);

        let outcome = self.agent.run(&mut state, &self.options).await?;
        let response = self.presenter.present(&outcome.content).await?;
        info!(
            rounds = outcome.rounds,
            tool_calls = outcome.steps.len(),
            "Chat message answered"
        );
        Ok(Completion {
            response,
            raw: outcome.content,
        })
    }
}
