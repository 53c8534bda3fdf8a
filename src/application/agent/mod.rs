mod errors;
mod instructions;
mod models;
mod runner;
mod state;

#[cfg(test)]
mod tests;

pub use errors::AgentError;
pub use instructions::Instructions;
pub use models::{AgentOptions, AgentOutcome, AgentPhase, AgentStep};
pub use runner::Agent;
pub use state::ConversationState;
