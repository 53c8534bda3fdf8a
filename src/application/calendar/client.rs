use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::result::ToolResult;
use crate::infrastructure::calendar::{CalendarProvider, EventDraft, EventQuery, TimeWindow};

/// Literal zone marker appended to availability and listing bounds.
const UTC_SUFFIX: &str = "Z";
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DEFAULT_LIST_DAYS: i64 = 7;
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Single point of contact with the calendar for the configured calendar id.
///
/// Every operation returns a [`ToolResult`]; provider failures become
/// `ToolResult::Error` and never escape.
#[derive(Clone)]
pub struct CalendarClient {
    provider: Arc<dyn CalendarProvider>,
    calendar_id: String,
}

impl CalendarClient {
    pub fn new(provider: Arc<dyn CalendarProvider>, calendar_id: impl Into<String>) -> Self {
        Self {
            provider,
            calendar_id: calendar_id.into(),
        }
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// Times are passed through unvalidated; malformed input surfaces as a provider error.
    pub async fn create_event(
        &self,
        summary: String,
        start_time: String,
        end_time: String,
        description: Option<String>,
    ) -> ToolResult {
        let draft = EventDraft {
            summary,
            start_time,
            end_time,
            description,
        };
        info!(
            calendar_id = self.calendar_id.as_str(),
            summary = draft.summary.as_str(),
            "Creating calendar event"
        );

        match self.provider.insert_event(&self.calendar_id, &draft).await {
            Ok(event) => ToolResult::Created {
                event_id: event.id,
                html_link: event.html_link,
            },
            Err(err) => {
                warn!(error = %err, "Event creation failed");
                ToolResult::error(format!("Failed to create event: {err}"))
            }
        }
    }

    /// Expects bare local timestamps; a `Z` is appended to each bound.
    pub async fn check_availability(&self, start_time: &str, end_time: &str) -> ToolResult {
        let window = TimeWindow {
            time_min: format!("{start_time}{UTC_SUFFIX}"),
            time_max: format!("{end_time}{UTC_SUFFIX}"),
        };

        match self.provider.query_free_busy(&self.calendar_id, &window).await {
            Ok(intervals) if intervals.is_empty() => ToolResult::Available,
            Ok(intervals) => ToolResult::Busy { intervals },
            Err(err) => {
                warn!(error = %err, "Availability check failed");
                ToolResult::error(format!("Failed to check availability: {err}"))
            }
        }
    }

    /// Window defaults to now through seven days ahead.
    pub async fn list_events(
        &self,
        time_min: Option<String>,
        time_max: Option<String>,
        max_results: Option<u32>,
    ) -> ToolResult {
        let now = Utc::now();
        let time_min = time_min
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| now.format(NAIVE_FORMAT).to_string());
        let time_max = time_max
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                (now + Duration::days(DEFAULT_LIST_DAYS))
                    .format(NAIVE_FORMAT)
                    .to_string()
            });

        let query = EventQuery {
            window: TimeWindow {
                time_min: format!("{time_min}{UTC_SUFFIX}"),
                time_max: format!("{time_max}{UTC_SUFFIX}"),
            },
            max_results: max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        };

        match self.provider.list_events(&self.calendar_id, &query).await {
            Ok(events) if events.is_empty() => ToolResult::NoEvents,
            Ok(events) => ToolResult::Events { events },
            Err(err) => {
                warn!(error = %err, "Event listing failed");
                ToolResult::error(format!("Failed to list events: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::calendar::ToolStatus;
    use crate::infrastructure::calendar::{
        BusyInterval, CalendarError, CreatedEvent, EventRecord,
    };
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingCalendar {
        busy: Vec<BusyInterval>,
        events: Vec<EventRecord>,
        fail: bool,
        windows: Mutex<Vec<TimeWindow>>,
        queries: Mutex<Vec<EventQuery>>,
    }

    fn rejected() -> CalendarError {
        CalendarError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "The specified time range is empty.".into(),
        }
    }

    #[async_trait]
    impl CalendarProvider for RecordingCalendar {
        async fn insert_event(
            &self,
            _calendar_id: &str,
            draft: &EventDraft,
        ) -> Result<CreatedEvent, CalendarError> {
            if self.fail || draft.start_time > draft.end_time {
                return Err(rejected());
            }
            Ok(CreatedEvent {
                id: "evt1".into(),
                html_link: Some("https://calendar.google.com/event?eid=evt1".into()),
            })
        }

        async fn query_free_busy(
            &self,
            _calendar_id: &str,
            window: &TimeWindow,
        ) -> Result<Vec<BusyInterval>, CalendarError> {
            self.windows.lock().await.push(window.clone());
            if self.fail {
                return Err(rejected());
            }
            Ok(self.busy.clone())
        }

        async fn list_events(
            &self,
            _calendar_id: &str,
            query: &EventQuery,
        ) -> Result<Vec<EventRecord>, CalendarError> {
            self.queries.lock().await.push(query.clone());
            if self.fail {
                return Err(rejected());
            }
            Ok(self.events.clone())
        }
    }

    fn client(calendar: RecordingCalendar) -> (CalendarClient, Arc<RecordingCalendar>) {
        let calendar = Arc::new(calendar);
        (CalendarClient::new(calendar.clone(), "primary"), calendar)
    }

    #[tokio::test]
    async fn inverted_range_is_reported_not_raised() {
        let (client, _) = client(RecordingCalendar::default());
        let result = client
            .create_event(
                "Review".into(),
                "2025-07-05T11:00:00".into(),
                "2025-07-05T10:00:00".into(),
                None,
            )
            .await;

        match result {
            ToolResult::Error { message } => {
                assert!(message.starts_with("Failed to create event:"));
                assert!(message.contains("time range is empty"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn availability_appends_zone_and_is_repeatable() {
        let busy = vec![BusyInterval {
            start: "2025-07-05T10:00:00Z".into(),
            end: "2025-07-05T10:30:00Z".into(),
        }];
        let (client, calendar) = client(RecordingCalendar {
            busy,
            ..RecordingCalendar::default()
        });

        let first = client
            .check_availability("2025-07-05T10:00:00", "2025-07-05T11:00:00")
            .await;
        let second = client
            .check_availability("2025-07-05T10:00:00", "2025-07-05T11:00:00")
            .await;

        assert_eq!(first.status(), ToolStatus::Busy);
        assert_eq!(first, second);
        let windows = calendar.windows.lock().await;
        assert_eq!(windows[0].time_min, "2025-07-05T10:00:00Z");
        assert_eq!(windows[0].time_max, "2025-07-05T11:00:00Z");
    }

    #[tokio::test]
    async fn empty_calendar_is_available() {
        let (client, _) = client(RecordingCalendar::default());
        let result = client
            .check_availability("2025-07-05T10:00:00", "2025-07-05T11:00:00")
            .await;
        assert_eq!(result, ToolResult::Available);
    }

    #[tokio::test]
    async fn listing_defaults_to_one_week_with_single_suffix() {
        let (client, calendar) = client(RecordingCalendar::default());
        let result = client.list_events(None, None, None).await;
        assert_eq!(result, ToolResult::NoEvents);

        let queries = calendar.queries.lock().await;
        let query = &queries[0];
        assert_eq!(query.max_results, DEFAULT_MAX_RESULTS);
        assert!(query.window.time_min.ends_with('Z'));
        assert!(!query.window.time_min.ends_with("ZZ"));

        let parse = |raw: &str| {
            chrono::NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), NAIVE_FORMAT)
                .expect("bare timestamp")
        };
        let span = parse(&query.window.time_max) - parse(&query.window.time_min);
        assert_eq!(span.num_days(), DEFAULT_LIST_DAYS);
    }

    #[tokio::test]
    async fn provider_failures_become_error_results() {
        let (client, _) = client(RecordingCalendar {
            fail: true,
            ..RecordingCalendar::default()
        });

        let availability = client.check_availability("a", "b").await;
        let listing = client
            .list_events(Some("2025-07-05T00:00:00".into()), None, Some(3))
            .await;

        assert!(matches!(availability, ToolResult::Error { ref message } if message.starts_with("Failed to check availability:")));
        assert!(matches!(listing, ToolResult::Error { ref message } if message.starts_with("Failed to list events:")));
    }
}
