//! Tool catalogue and dispatch

mod catalog;
mod dispatcher;

pub use catalog::{
    CalendarTool, CheckAvailabilityArgs, CreateEventArgs, ListEventsArgs, ToolKind, declarations,
};
pub use dispatcher::{DispatchError, ToolDispatcher, ToolExecution};
