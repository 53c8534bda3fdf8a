use super::*;
use crate::application::calendar::CalendarClient;
use crate::application::tools::ToolDispatcher;
use crate::infrastructure::calendar::{
    BusyInterval, CalendarError, CalendarProvider, CreatedEvent, EventDraft, EventQuery,
    EventRecord, TimeWindow,
};
use crate::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use crate::types::{Message, MessageRole, ToolCallRequest};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
struct ScriptedProvider {
    responses: Arc<Mutex<Vec<ModelResponse>>>,
    recordings: Arc<Mutex<Vec<ModelRequest>>>,
    delay: Duration,
}

impl ScriptedProvider {
    fn new(responses: Vec<ModelResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            recordings: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Requests tools forever.
    fn looping(call: ToolCallRequest) -> Self {
        Self::new((0..32).map(|_| ModelResponse::new("", vec![call.clone()])).collect())
    }

    async fn requests(&self) -> Vec<ModelRequest> {
        self.recordings.lock().await.clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.recordings.lock().await.push(request);
        tokio::time::sleep(self.delay).await;
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "script exhausted"));
        }
        Ok(responses.remove(0))
    }
}

#[derive(Default)]
struct FakeCalendar {
    busy: Vec<BusyInterval>,
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn insert_event(
        &self,
        _calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<CreatedEvent, CalendarError> {
        Ok(CreatedEvent {
            id: format!("evt-{}", draft.summary.to_lowercase()),
            html_link: Some("https://calendar.google.com/event?eid=1".into()),
        })
    }

    async fn query_free_busy(
        &self,
        _calendar_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<BusyInterval>, CalendarError> {
        Ok(self
            .busy
            .iter()
            .filter(|slot| slot.start < window.time_max && slot.end > window.time_min)
            .cloned()
            .collect())
    }

    async fn list_events(
        &self,
        _calendar_id: &str,
        _query: &EventQuery,
    ) -> Result<Vec<EventRecord>, CalendarError> {
        Ok(Vec::new())
    }
}

fn agent_with(provider: &ScriptedProvider, calendar: FakeCalendar) -> Agent {
    let calendar = CalendarClient::new(Arc::new(calendar), "primary");
    let dispatcher = ToolDispatcher::new(calendar, Duration::from_secs(5));
    Agent::new(Arc::new(provider.clone()), dispatcher)
}

fn fresh_state(message: &str) -> ConversationState {
    ConversationState::from_history(Some("system".into()), &[], message, "primary")
}

fn availability_call(id: &str, start: &str, end: &str) -> ToolCallRequest {
    ToolCallRequest::new(
        id,
        "check_calendar_availability",
        json!({"start_time": start, "end_time": end}),
    )
}

fn tool_messages(state: &ConversationState) -> Vec<(String, String, Value)> {
    state
        .messages()
        .iter()
        .filter_map(|m| match m {
            Message::Tool {
                call_id,
                name,
                content,
            } => Some((
                call_id.clone(),
                name.clone(),
                serde_json::from_str(content).expect("tool content is JSON"),
            )),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn agent_returns_final_response_without_tools() {
    let provider = ScriptedProvider::new(vec![ModelResponse::text("Hello! How can I help?")]);
    let agent = agent_with(&provider, FakeCalendar::default());
    let mut state = fresh_state("hi");

    let outcome = agent
        .run(&mut state, &AgentOptions::default())
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.content, "Hello! How can I help?");
    assert_eq!(outcome.rounds, 1);
    assert!(outcome.steps.is_empty());
    assert!(tool_messages(&state).is_empty());

    let records = provider.requests().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].tools.len(), 3);
    assert_eq!(records[0].messages[0].role(), MessageRole::System);
}

#[tokio::test]
async fn same_tool_twice_keeps_order_and_call_ids() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::new(
            "",
            vec![
                availability_call("first", "2025-07-05T10:00:00", "2025-07-05T11:00:00"),
                availability_call("second", "2025-07-05T14:00:00", "2025-07-05T15:00:00"),
            ],
        ),
        ModelResponse::text("10:00 is taken, 14:00 is free."),
    ]);
    let calendar = FakeCalendar {
        busy: vec![BusyInterval {
            start: "2025-07-05T10:00:00Z".into(),
            end: "2025-07-05T10:30:00Z".into(),
        }],
    };
    let agent = agent_with(&provider, calendar);
    let mut state = fresh_state("am I free at 10 or 14 on Saturday?");

    let outcome = agent
        .run(&mut state, &AgentOptions::default())
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.rounds, 2);
    let results = tool_messages(&state);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "first");
    assert_eq!(results[0].2["status"], "busy");
    assert_eq!(results[1].0, "second");
    assert_eq!(results[1].2["status"], "available");
    assert!(results.iter().all(|r| r.1 == "check_calendar_availability"));

    let second_request = &provider.requests().await[1];
    let roles: Vec<MessageRole> = second_request.messages.iter().map(Message::role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::Tool,
            MessageRole::Tool,
        ]
    );
}

#[tokio::test]
async fn failed_tools_are_fed_back_to_the_model() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::new(
            "",
            vec![ToolCallRequest::new("x", "cancel_meeting", json!({}))],
        ),
        ModelResponse::text("I cannot cancel meetings."),
    ]);
    let agent = agent_with(&provider, FakeCalendar::default());
    let mut state = fresh_state("cancel my 3pm");

    let outcome = agent
        .run(&mut state, &AgentOptions::default())
        .await
        .expect("agent succeeds");

    assert_eq!(outcome.content, "I cannot cancel meetings.");
    assert_eq!(outcome.steps.len(), 1);
    assert!(!outcome.steps[0].success);
    assert_eq!(
        tool_messages(&state)[0].2,
        json!({"status": "error", "message": "unknown tool cancel_meeting"})
    );
}

#[tokio::test]
async fn empty_final_text_falls_back_to_last_tool_output() {
    let provider = ScriptedProvider::new(vec![
        ModelResponse::new(
            "",
            vec![ToolCallRequest::new(
                "c1",
                "create_calendar_event",
                json!({"summary": "Lunch", "start_time": "2025-07-05T13:00:00", "end_time": "2025-07-05T14:00:00"}),
            )],
        ),
        ModelResponse::text(""),
    ]);
    let agent = agent_with(&provider, FakeCalendar::default());
    let mut state = fresh_state("book lunch tomorrow at 1pm");

    let outcome = agent
        .run(&mut state, &AgentOptions::default())
        .await
        .expect("agent succeeds");

    let raw: Value = serde_json::from_str(&outcome.content).expect("tool output");
    assert_eq!(raw["status"], "success");
    assert_eq!(raw["event_id"], "evt-lunch");
}

#[tokio::test]
async fn round_budget_stops_a_model_that_never_answers() {
    let provider = ScriptedProvider::looping(ToolCallRequest::new(
        "loop",
        "list_calendar_events",
        json!({}),
    ));
    let agent = agent_with(&provider, FakeCalendar::default());
    let mut state = fresh_state("list everything forever");
    let options = AgentOptions {
        max_rounds: 3,
        ..AgentOptions::default()
    };

    let result = agent.run(&mut state, &options).await;

    assert!(matches!(result, Err(AgentError::BudgetExceeded { max_rounds: 3 })));
    assert_eq!(provider.requests().await.len(), 3);
    assert_eq!(tool_messages(&state).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn slow_model_times_out() {
    let mut provider = ScriptedProvider::new(vec![ModelResponse::text("late")]);
    provider.delay = Duration::from_secs(120);
    let agent = agent_with(&provider, FakeCalendar::default());
    let mut state = fresh_state("hello");
    let options = AgentOptions {
        model_timeout: Duration::from_secs(60),
        ..AgentOptions::default()
    };

    let result = agent.run(&mut state, &options).await;
    assert!(matches!(result, Err(AgentError::ModelTimeout { .. })));
}

#[tokio::test]
async fn model_errors_propagate() {
    let provider = ScriptedProvider::new(Vec::new());
    let agent = agent_with(&provider, FakeCalendar::default());
    let mut state = fresh_state("hello");

    let result = agent.run(&mut state, &AgentOptions::default()).await;
    assert!(matches!(result, Err(AgentError::Model(ModelError::InvalidResponse { .. }))));
}
