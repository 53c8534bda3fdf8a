pub mod agent;
pub mod assistant;
pub mod calendar;
pub mod presentation;
pub mod stdio;
pub mod tools;
