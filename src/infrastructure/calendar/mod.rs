//! Remote calendar collaborator
//!
//! [`CalendarProvider`] is the fixed request/response contract the
//! application talks to; [`GoogleCalendarProvider`] fulfils it against the
//! Google Calendar v3 REST API using a service-account credential.

pub mod auth;
pub mod error;
pub mod google;
pub mod provider;
pub mod types;

pub use auth::{ServiceAccountKey, TokenSource};
pub use error::CalendarError;
pub use google::GoogleCalendarProvider;
pub use provider::CalendarProvider;
pub use types::{BusyInterval, CreatedEvent, EventDraft, EventQuery, EventRecord, TimeWindow};
