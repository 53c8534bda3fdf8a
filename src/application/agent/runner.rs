use super::errors::AgentError;
use super::models::{AgentOptions, AgentOutcome, AgentPhase, AgentStep};
use super::state::ConversationState;
use crate::application::tools::ToolDispatcher;
use crate::model::{ModelProvider, ModelRequest};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Alternates model reasoning with tool execution until the model answers
/// without requesting tools.
pub struct Agent {
    model: Arc<dyn ModelProvider>,
    dispatcher: ToolDispatcher,
}

impl Agent {
    pub fn new(model: Arc<dyn ModelProvider>, dispatcher: ToolDispatcher) -> Self {
        Self { model, dispatcher }
    }

    pub async fn run(
        &self,
        state: &mut ConversationState,
        options: &AgentOptions,
    ) -> Result<AgentOutcome, AgentError> {
        info!(
            provider = self.model.id(),
            model = options.model.as_str(),
            calendar_id = state.calendar_id(),
            "Agent run started"
        );
        let tools = self.dispatcher.declarations();
        let mut phase = AgentPhase::Reasoning;
        let mut rounds = 0usize;
        let mut steps = Vec::new();

        loop {
            phase = match phase {
                AgentPhase::Reasoning => {
                    if rounds >= options.max_rounds {
                        warn!(max_rounds = options.max_rounds, "Agent exceeded its round budget");
                        return Err(AgentError::BudgetExceeded {
                            max_rounds: options.max_rounds,
                        });
                    }
                    rounds += 1;
                    debug!(
                        round = rounds,
                        messages = state.messages().len(),
                        "Submitting agent turn to model provider"
                    );

                    let request = ModelRequest {
                        model: options.model.clone(),
                        messages: state.messages().to_vec(),
                        tools: tools.clone(),
                        temperature: options.temperature,
                    };
                    let response = timeout(options.model_timeout, self.model.chat(request))
                        .await
                        .map_err(|_| AgentError::ModelTimeout {
                            secs: options.model_timeout.as_secs_f64(),
                        })??;

                    let calls = response.message.tool_calls().to_vec();
                    state.push(response.message);
                    if calls.is_empty() {
                        AgentPhase::Terminated
                    } else {
                        info!(round = rounds, calls = calls.len(), "Agent requested tool execution");
                        AgentPhase::Acting(calls)
                    }
                }
                AgentPhase::Acting(calls) => {
                    for call in &calls {
                        let execution = self.dispatcher.dispatch(call).await;
                        steps.push(AgentStep::from(&execution));
                        state.push(execution.into_message());
                    }
                    AgentPhase::Reasoning
                }
                AgentPhase::Terminated => {
                    info!(rounds, tool_calls = steps.len(), "Agent run completed");
                    return Ok(AgentOutcome {
                        content: state.terminal_content(),
                        rounds,
                        steps,
                    });
                }
            };
        }
    }
}
