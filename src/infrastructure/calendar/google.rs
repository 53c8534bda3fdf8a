//! Google Calendar v3 over REST

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::auth::TokenSource;
use super::error::CalendarError;
use super::provider::CalendarProvider;
use super::types::{BusyInterval, CreatedEvent, EventDraft, EventQuery, EventRecord, TimeWindow};

const UNTITLED_EVENT: &str = "(no title)";

pub struct GoogleCalendarProvider {
    endpoint: Url,
    time_zone: String,
    tokens: TokenSource,
    http: Client,
}

impl GoogleCalendarProvider {
    pub fn new(
        endpoint: &str,
        time_zone: impl Into<String>,
        tokens: TokenSource,
    ) -> Result<Self, CalendarError> {
        let endpoint = Url::parse(endpoint).map_err(|_| CalendarError::Url {
            endpoint: endpoint.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(CalendarError::Url {
                endpoint: endpoint.to_string(),
            });
        }
        Ok(Self {
            endpoint,
            time_zone: time_zone.into(),
            tokens,
            http: Client::new(),
        })
    }

    /// Endpoint joined with path segments; each segment is percent-encoded,
    /// so calendar ids such as `team@group.calendar.google.com` are safe.
    fn url(&self, segments: &[&str]) -> Result<Url, CalendarError> {
        build_url(&self.endpoint, segments)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CalendarError> {
        let token = self.tokens.access_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Status {
                status,
                message: api_error_message(&body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| CalendarError::invalid_response(e.to_string()))
    }
}

fn build_url(endpoint: &Url, segments: &[&str]) -> Result<Url, CalendarError> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|_| CalendarError::Url {
            endpoint: endpoint.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn event_body(draft: &EventDraft, time_zone: &str) -> Value {
    json!({
        "summary": draft.summary,
        "description": draft.description,
        "start": { "dateTime": draft.start_time, "timeZone": time_zone },
        "end": { "dateTime": draft.end_time, "timeZone": time_zone },
        "reminders": { "useDefault": true },
    })
}

/// Google wraps failures as `{"error": {"message": ..}}`; fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    async fn insert_event(
        &self,
        calendar_id: &str,
        draft: &EventDraft,
    ) -> Result<CreatedEvent, CalendarError> {
        let url = self.url(&["calendars", calendar_id, "events"])?;
        debug!(calendar_id, summary = draft.summary.as_str(), "Inserting calendar event");

        let body = event_body(draft, &self.time_zone);
        let event: InsertedEvent = self.send(self.http.post(url).json(&body)).await?;
        Ok(CreatedEvent {
            id: event.id,
            html_link: event.html_link,
        })
    }

    async fn query_free_busy(
        &self,
        calendar_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<BusyInterval>, CalendarError> {
        let url = self.url(&["freeBusy"])?;
        let body = json!({
            "timeMin": window.time_min,
            "timeMax": window.time_max,
            "items": [{ "id": calendar_id }],
        });
        debug!(calendar_id, time_min = window.time_min.as_str(), time_max = window.time_max.as_str(), "Querying free/busy");

        let mut response: FreeBusyResponse = self.send(self.http.post(url).json(&body)).await?;
        let calendar = response.calendars.remove(calendar_id).ok_or_else(|| {
            CalendarError::invalid_response(format!("no free/busy entry for calendar '{calendar_id}'"))
        })?;

        if !calendar.errors.is_empty() {
            let reasons: Vec<&str> = calendar.errors.iter().map(|e| e.reason.as_str()).collect();
            warn!(calendar_id, ?reasons, "Free/busy query reported calendar errors");
            return Err(CalendarError::invalid_response(format!(
                "free/busy failed for calendar '{calendar_id}': {}",
                reasons.join(", ")
            )));
        }

        Ok(calendar
            .busy
            .into_iter()
            .map(|slot| BusyInterval {
                start: slot.start,
                end: slot.end,
            })
            .collect())
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        query: &EventQuery,
    ) -> Result<Vec<EventRecord>, CalendarError> {
        let mut url = self.url(&["calendars", calendar_id, "events"])?;
        url.query_pairs_mut()
            .append_pair("timeMin", &query.window.time_min)
            .append_pair("timeMax", &query.window.time_max)
            .append_pair("maxResults", &query.max_results.to_string())
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");
        debug!(calendar_id, max_results = query.max_results, "Listing calendar events");

        let listing: EventListing = self.send(self.http.get(url)).await?;
        Ok(listing.items.into_iter().map(EventItem::into_record).collect())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    id: String,
    html_link: Option<String>,
}

#[derive(Deserialize)]
struct FreeBusyResponse {
    #[serde(default)]
    calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize)]
struct FreeBusyCalendar {
    #[serde(default)]
    busy: Vec<FreeBusySlot>,
    #[serde(default)]
    errors: Vec<FreeBusyError>,
}

#[derive(Deserialize)]
struct FreeBusySlot {
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct FreeBusyError {
    #[serde(default)]
    reason: String,
}

#[derive(Deserialize)]
struct EventListing {
    #[serde(default)]
    items: Vec<EventItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventItem {
    summary: Option<String>,
    #[serde(default)]
    start: EventTime,
    #[serde(default)]
    end: EventTime,
    html_link: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: Option<String>,
    date: Option<String>,
}

impl EventTime {
    fn into_string(self) -> String {
        self.date_time.or(self.date).unwrap_or_default()
    }
}

impl EventItem {
    fn into_record(self) -> EventRecord {
        EventRecord {
            summary: self.summary.unwrap_or_else(|| UNTITLED_EVENT.to_string()),
            start: self.start.into_string(),
            end: self.end.into_string(),
            html_link: self.html_link,
        }
    }
}
