pub mod chat;
pub mod index;
