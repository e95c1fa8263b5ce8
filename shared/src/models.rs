//! Data models for the Health Coach application

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a reply came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Templated reply built by the offline coach
    Offline,
    /// Reply proxied from the external generator
    Llm,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Offline => "offline",
            ReplySource::Llm => "llm",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReplySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offline" => Ok(ReplySource::Offline),
            "llm" => Ok(ReplySource::Llm),
            _ => Err(format!("Unknown reply source: {}", s)),
        }
    }
}

/// Profile data supplied with every question, after coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: i64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
}

impl Profile {
    /// Name used when greeting; blank names become "there"
    pub fn greeting_name(&self) -> &str {
        if self.name.is_empty() {
            "there"
        } else {
            &self.name
        }
    }
}

/// A profile plus the question asked with it
#[derive(Debug, Clone, PartialEq)]
pub struct ChatInput {
    pub profile: Profile,
    pub question: String,
}

/// One stored interaction, as returned by the history listing
///
/// Every column except `id` and `created_at` may be missing in rows written
/// by older versions of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub id: i64,
    pub created_at: String,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub bmi: Option<f64>,
    pub question: Option<String>,
    pub reply: Option<String>,
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_source_round_trips_through_str() {
        for source in [ReplySource::Offline, ReplySource::Llm] {
            assert_eq!(source.as_str().parse::<ReplySource>(), Ok(source));
        }
        assert!("cloud".parse::<ReplySource>().is_err());
    }

    #[test]
    fn test_reply_source_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ReplySource::Llm).unwrap(), "\"llm\"");
    }

    #[test]
    fn test_greeting_name_falls_back_for_blank() {
        let mut profile = Profile {
            name: String::new(),
            age: 25,
            weight_kg: 70.0,
            height_cm: 170.0,
        };
        assert_eq!(profile.greeting_name(), "there");
        profile.name = "Asha".to_string();
        assert_eq!(profile.greeting_name(), "Asha");
    }
}
