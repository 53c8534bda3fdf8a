pub mod calendar;
pub mod model;
pub mod server;
