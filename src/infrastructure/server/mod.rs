mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{ChatRequestBody, ChatResponseBody};
pub use error::{ServerError, parse_addr};
pub use router::build_router;

use crate::application::assistant::SchedulingAssistant;
use crate::config::RestServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn serve(
    assistant: Arc<SchedulingAssistant>,
    config: &RestServerConfig,
    addr: SocketAddr,
) -> Result<(), ServerError> {
    router::serve(assistant, config, addr).await
}
