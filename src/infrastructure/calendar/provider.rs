use async_trait::async_trait;

use super::error::CalendarError;
use super::types::{BusyInterval, CreatedEvent, EventDraft, EventQuery, EventRecord, TimeWindow};

/// The three request shapes the assistant issues against a calendar.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn insert_event(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<CreatedEvent, CalendarError>;

    async fn query_free_busy(
        &self,
        calendar_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<BusyInterval>, CalendarError>;

    /// Events ordered by start time.
    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> Result<Vec<EventRecord>, CalendarError>;
}
