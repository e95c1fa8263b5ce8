//! API request and response types

use crate::models::{ChatInput, Profile};
use crate::validation::{coerce_age, coerce_height, coerce_message, coerce_name, coerce_weight};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of history entries returned
pub const DEFAULT_HISTORY_LIMIT: i64 = 100;
/// Largest number of history entries returned in one call
pub const MAX_HISTORY_LIMIT: i64 = 1000;

/// Chat request body
///
/// Fields are kept as raw JSON so that strings, numbers, and garbage can all
/// be coerced instead of rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub name: Option<Value>,
    pub age: Option<Value>,
    pub weight: Option<Value>,
    pub height: Option<Value>,
    pub message: Option<Value>,
}

impl ChatRequest {
    /// Parse a request body; anything that is not a JSON object is treated
    /// as an empty request. A repeated key keeps its last value.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut map)) => {
                let mut field = |key: &str| map.remove(key).filter(|v| !v.is_null());
                Self {
                    name: field("name"),
                    age: field("age"),
                    weight: field("weight"),
                    height: field("height"),
                    message: field("message"),
                }
            }
            _ => Self::default(),
        }
    }

    /// Coerce the raw fields into a profile and question
    pub fn normalize(&self, login_name: Option<&str>) -> ChatInput {
        ChatInput {
            profile: Profile {
                name: coerce_name(self.name.as_ref(), login_name),
                age: coerce_age(self.age.as_ref()),
                weight_kg: coerce_weight(self.weight.as_ref()),
                height_cm: coerce_height(self.height.as_ref()),
            },
            question: coerce_message(self.message.as_ref()),
        }
    }
}

/// Chat response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub bmi: Option<f64>,
    pub bmi_status: String,
    pub steps_today: u32,
    pub reminder: String,
}

/// Query parameters for the history listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    /// Effective limit: default when absent or unparsable, clamped to
    /// `[0, MAX_HISTORY_LIMIT]`
    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(0, MAX_HISTORY_LIMIT)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub record_store: CheckStatus,
}

/// Status of an individual check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
