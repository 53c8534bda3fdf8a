use chrono::{DateTime, FixedOffset};

/// Builds the system message that opens every conversation.
#[derive(Debug, Clone)]
pub struct Instructions {
    time_zone: String,
    operator_prompt: Option<String>,
}

impl Instructions {
    pub fn new(time_zone: impl Into<String>, operator_prompt: Option<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            operator_prompt: operator_prompt.filter(|p| !p.trim().is_empty()),
        }
    }

    pub fn compose(&self, calendar_id: &str, now: DateTime<FixedOffset>) -> String {
        let lines = [
            format!(
                "You are a calendar booking assistant managing the calendar '{calendar_id}'."
            ),
            format!(
                "The current date and time is {} ({}). Resolve relative dates such as \"tomorrow\" or \"next 3 days\" against it.",
                now.format("%A, %Y-%m-%dT%H:%M:%S%:z"),
                now.format("%:z"),
            ),
            format!("Events are created in the {} time zone.", self.time_zone),
            "Pass every date-time to the tools as a bare ISO 8601 timestamp without offset, for example 2025-07-05T10:00:00.".to_string(),
            "Before booking an event, check availability for the requested slot and tell the user if it is taken.".to_string(),
            "Ask for missing details such as the event title or end time instead of guessing them.".to_string(),
            "When a tool reports an error, explain it to the user plainly.".to_string(),
        ];
        let instructions = lines.join("\n");

        match &self.operator_prompt {
            Some(prompt) => format!("{prompt}\n\n{instructions}"),
            None => instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-07-04T09:15:00+05:30").expect("timestamp")
    }

    #[test]
    fn mentions_calendar_clock_and_zone() {
        let text = Instructions::new("Asia/Kolkata", None).compose("team@example.com", fixed_now());
        assert!(text.contains("'team@example.com'"));
        assert!(text.contains("Friday, 2025-07-04T09:15:00+05:30"));
        assert!(text.contains("Asia/Kolkata"));
        assert!(text.contains("without offset"));
    }

    #[test]
    fn operator_prompt_comes_first() {
        let text = Instructions::new("UTC", Some("Reply in French.".into())).compose("primary", fixed_now());
        assert!(text.starts_with("Reply in French.\n\n"));

        let blank = Instructions::new("UTC", Some("   ".into())).compose("primary", fixed_now());
        assert!(blank.starts_with("You are a calendar booking assistant"));
    }
}
