use serde::Serialize;

/// Event to be inserted. Times are passed through to the provider untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub summary: String,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    pub id: String,
    pub html_link: Option<String>,
}

/// Query window with bounds already carrying their zone marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub time_min: String,
    pub time_max: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub window: TimeWindow,
    pub max_results: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusyInterval {
    pub start: String,
    pub end: String,
}

/// Summary of one listed event. All-day events report dates instead of date-times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub summary: String,
    pub start: String,
    pub end: String,
    pub html_link: Option<String>,
}
