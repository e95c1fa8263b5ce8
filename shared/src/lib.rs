//! Health Coach Shared Library
//!
//! This crate contains the pure decision logic (BMI banding, keyword
//! routing, templated replies) and the types shared by the HTTP service and
//! the terminal dashboard.

pub mod coach;
pub mod flavor;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use coach::{offline_reply, MealPlan, Topic};
pub use flavor::Flavor;
pub use health_metrics::*;
pub use models::{ChatInput, ChatLogEntry, Profile, ReplySource};
pub use types::*;
