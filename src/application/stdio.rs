//! JSON-lines front end: one request object per stdin line, one reply per stdout line.

use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::assistant::{ChatRequest, SchedulingAssistant};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialise response: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub async fn run(assistant: Arc<SchedulingAssistant>) -> Result<(), StdioError> {
    info!("STDIO mode ready; send one JSON request per line");
    serve(&assistant, BufReader::new(io::stdin()), io::stdout()).await
}

async fn serve<R, W>(
    assistant: &SchedulingAssistant,
    reader: R,
    mut writer: W,
) -> Result<(), StdioError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match serde_json::from_str::<ChatRequest>(input) {
            Ok(request) => {
                let reply = assistant.respond(request).await;
                write_response(&mut writer, &reply).await?;
            }
            Err(err) => {
                warn!(error = %err, "Rejecting malformed STDIO request");
                write_response(&mut writer, &json!({ "error": err.to_string() })).await?;
            }
        }
    }
    debug!("STDIN closed, leaving STDIO mode");
    Ok(())
}

async fn write_response<W, T>(writer: &mut W, value: &T) -> Result<(), StdioError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut encoded = serde_json::to_vec(value)?;
    encoded.push(b'\n');
    writer.write_all(&encoded).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::agent::{AgentOptions, Instructions};
    use crate::application::calendar::CalendarClient;
    use crate::application::tools::ToolDispatcher;
    use crate::infrastructure::calendar::{
        BusyInterval, CalendarError, CalendarProvider, CreatedEvent, EventDraft, EventQuery,
        EventRecord, TimeWindow,
    };
    use crate::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::time::Duration;

    struct FixedModel;

    #[async_trait]
    impl ModelProvider for FixedModel {
        fn id(&self) -> &str {
            "fixed"
        }

        async fn chat(&self, _request: ModelRequest) -> Result<ModelResponse, ModelError> {
            Ok(ModelResponse::text("Hi there"))
        }
    }

    struct NoCalendar;

    #[async_trait]
    impl CalendarProvider for NoCalendar {
        async fn insert_event(&self, _: &str, _: &EventDraft) -> Result<CreatedEvent, CalendarError> {
            Err(CalendarError::invalid_response("unused"))
        }

        async fn query_free_busy(&self, _: &str, _: &TimeWindow) -> Result<Vec<BusyInterval>, CalendarError> {
            Ok(Vec::new())
        }

        async fn list_events(&self, _: &str, _: &EventQuery) -> Result<Vec<EventRecord>, CalendarError> {
            Ok(Vec::new())
        }
    }

    fn assistant() -> SchedulingAssistant {
        let calendar = CalendarClient::new(Arc::new(NoCalendar), "primary");
        SchedulingAssistant::new(
            Arc::new(FixedModel),
            ToolDispatcher::new(calendar, Duration::from_secs(5)),
            Instructions::new("UTC", None),
            AgentOptions::default(),
        )
    }

    #[tokio::test]
    async fn answers_each_line_and_reports_bad_input() {
        let input = b"{\"message\": \"hello\"}\n\nnot json\n".to_vec();
        let mut output = Vec::new();

        serve(&assistant(), &input[..], &mut output)
            .await
            .expect("serve completes");

        let lines: Vec<Value> = String::from_utf8(output)
            .expect("utf8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["response"], "Hi there");
        assert_eq!(lines[0]["chat_history"], serde_json::json!([["hello", "Hi there"]]));
        assert!(lines[1]["error"].is_string());
    }
}
