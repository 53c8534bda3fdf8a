use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::application::calendar::{CalendarClient, ToolResult};
use crate::model::ToolDeclaration;

/// The closed set of operations the model may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    CreateEvent,
    CheckAvailability,
    ListEvents,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [
        ToolKind::CreateEvent,
        ToolKind::CheckAvailability,
        ToolKind::ListEvents,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::CreateEvent => "create_calendar_event",
            ToolKind::CheckAvailability => "check_calendar_availability",
            ToolKind::ListEvents => "list_calendar_events",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::CreateEvent => {
                "Creates a new event on the calendar. Requires summary, start_time and end_time \
                 in ISO 8601 format without offset (e.g. '2025-07-05T10:00:00')."
            }
            ToolKind::CheckAvailability => {
                "Checks whether the calendar is free for a given time range. Returns the busy \
                 intervals when it is not. Times are ISO 8601 without offset."
            }
            ToolKind::ListEvents => {
                "Lists calendar events within a time range, ordered by start time. Defaults to \
                 the next 7 days and 10 events when arguments are omitted."
            }
        }
    }

    pub fn parameters(self) -> Value {
        match self {
            ToolKind::CreateEvent => json!({
                "type": "object",
                "properties": {
                    "summary": {
                        "type": "string",
                        "description": "Title or summary of the calendar event."
                    },
                    "start_time": {
                        "type": "string",
                        "description": "Start datetime of the event in ISO 8601 format (e.g., '2025-07-05T10:00:00')."
                    },
                    "end_time": {
                        "type": "string",
                        "description": "End datetime of the event in ISO 8601 format (e.g., '2025-07-05T11:00:00')."
                    },
                    "description": {
                        "type": "string",
                        "description": "Optional description for the event."
                    }
                },
                "required": ["summary", "start_time", "end_time"]
            }),
            ToolKind::CheckAvailability => json!({
                "type": "object",
                "properties": {
                    "start_time": {
                        "type": "string",
                        "description": "Start datetime for availability check in ISO 8601 format."
                    },
                    "end_time": {
                        "type": "string",
                        "description": "End datetime for availability check in ISO 8601 format."
                    }
                },
                "required": ["start_time", "end_time"]
            }),
            ToolKind::ListEvents => json!({
                "type": "object",
                "properties": {
                    "time_min": {
                        "type": "string",
                        "description": "Start datetime for listing events in ISO 8601 format. Defaults to now."
                    },
                    "time_max": {
                        "type": "string",
                        "description": "End datetime for listing events in ISO 8601 format. Defaults to 7 days from now."
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of events to return. Defaults to 10."
                    }
                }
            }),
        }
    }

    pub fn declaration(self) -> ToolDeclaration {
        ToolDeclaration {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Declarations for every tool, in catalogue order.
pub fn declarations() -> Vec<ToolDeclaration> {
    ToolKind::ALL.into_iter().map(ToolKind::declaration).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEventArgs {
    pub summary: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckAvailabilityArgs {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListEventsArgs {
    #[serde(default)]
    pub time_min: Option<String>,
    #[serde(default)]
    pub time_max: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub max_results: Option<u32>,
}

/// Models sometimes send counts as `5.0` or `"5"`.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = Option::<Value>::deserialize(deserializer)?;
    let count = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };
    count
        .and_then(|c| u32::try_from(c).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom("max_results must be a non-negative integer"))
}

/// A fully decoded tool request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarTool {
    CreateEvent(CreateEventArgs),
    CheckAvailability(CheckAvailabilityArgs),
    ListEvents(ListEventsArgs),
}

impl CalendarTool {
    /// Decode arguments for `kind`. A missing argument object counts as `{}`.
    pub fn decode(kind: ToolKind, arguments: &Value) -> Result<Self, serde_json::Error> {
        let arguments = match arguments {
            Value::Null => json!({}),
            other => other.clone(),
        };
        Ok(match kind {
            ToolKind::CreateEvent => Self::CreateEvent(serde_json::from_value(arguments)?),
            ToolKind::CheckAvailability => {
                Self::CheckAvailability(serde_json::from_value(arguments)?)
            }
            ToolKind::ListEvents => Self::ListEvents(serde_json::from_value(arguments)?),
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::CreateEvent(_) => ToolKind::CreateEvent,
            Self::CheckAvailability(_) => ToolKind::CheckAvailability,
            Self::ListEvents(_) => ToolKind::ListEvents,
        }
    }

    pub async fn execute(self, calendar: &CalendarClient) -> ToolResult {
        match self {
            Self::CreateEvent(args) => {
                calendar
                    .create_event(args.summary, args.start_time, args.end_time, args.description)
                    .await
            }
            Self::CheckAvailability(args) => {
                calendar
                    .check_availability(&args.start_time, &args.end_time)
                    .await
            }
            Self::ListEvents(args) => {
                calendar
                    .list_events(args.time_min, args.time_max, args.max_results)
                    .await
            }
        }
    }
}
