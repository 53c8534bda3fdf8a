//! Calendar Client: the three calendar operations in their tool-facing form.

mod client;
mod result;

pub use client::CalendarClient;
pub use result::{ToolResult, ToolStatus};
