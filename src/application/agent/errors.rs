use crate::model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model call timed out after {secs}s")]
    ModelTimeout { secs: f64 },
    #[error("agent exceeded the maximum of {max_rounds} reasoning rounds")]
    BudgetExceeded { max_rounds: usize },
    #[error("presentation step failed: {0}")]
    Presentation(#[source] Box<AgentError>),
}
