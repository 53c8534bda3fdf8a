use crate::application::assistant::SchedulingAssistant;
use std::sync::Arc;

pub(crate) struct ServerState {
    assistant: Arc<SchedulingAssistant>,
}

impl ServerState {
    pub(crate) fn new(assistant: Arc<SchedulingAssistant>) -> Self {
        Self { assistant }
    }

    pub(crate) fn assistant(&self) -> Arc<SchedulingAssistant> {
        Arc::clone(&self.assistant)
    }
}
