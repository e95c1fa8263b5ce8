//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod chat;
pub mod export;

pub use chat::{ChatReply, ChatService};
pub use export::ExportService;
