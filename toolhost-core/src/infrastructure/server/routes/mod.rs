pub mod chat;
pub mod conversation;
pub mod status;
pub mod tools;
