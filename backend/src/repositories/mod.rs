//! Database repositories
//!
//! Provides data access layer for the record store.

pub mod chat;

pub use chat::{ChatLogRecord, ChatLogRepository, CreateChatLog};
