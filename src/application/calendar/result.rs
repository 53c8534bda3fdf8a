use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use std::fmt;

use crate::infrastructure::calendar::{BusyInterval, EventRecord};

pub const NO_EVENTS_MESSAGE: &str = "No upcoming events found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Available,
    Busy,
    Error,
}

/// Uniform outcome of a tool invocation. Rendered as JSON text into the tool
/// message the model reads next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    Created {
        event_id: String,
        html_link: Option<String>,
    },
    Available,
    Busy {
        intervals: Vec<BusyInterval>,
    },
    Events {
        events: Vec<EventRecord>,
    },
    NoEvents,
    Error {
        message: String,
    },
}

impl ToolResult {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> ToolStatus {
        match self {
            Self::Created { .. } | Self::Events { .. } | Self::NoEvents => ToolStatus::Success,
            Self::Available => ToolStatus::Available,
            Self::Busy { .. } => ToolStatus::Busy,
            Self::Error { .. } => ToolStatus::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn to_value(&self) -> Value {
        let status = self.status();
        match self {
            Self::Created {
                event_id,
                html_link,
            } => json!({ "status": status, "event_id": event_id, "html_link": html_link }),
            Self::Available => json!({ "status": status }),
            Self::Busy { intervals } => json!({ "status": status, "intervals": intervals }),
            Self::Events { events } => json!({ "status": status, "events": events }),
            Self::NoEvents => json!({ "status": status, "message": NO_EVENTS_MESSAGE }),
            Self::Error { message } => json!({ "status": status, "message": message }),
        }
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl fmt::Display for ToolResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
