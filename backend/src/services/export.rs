//! Data export service for the chat history
//!
//! Produces a CSV dump of every stored interaction, newest first. Fields
//! containing a comma, quote, CR or LF are quoted and embedded quotes are
//! doubled; lines end with CRLF.

use crate::error::ApiError;
use crate::repositories::{ChatLogRecord, ChatLogRepository};
use serde::Serialize;
use sqlx::SqlitePool;

/// Header row of the CSV export
pub const CSV_HEADER: [&str; 10] = [
    "id",
    "created_at",
    "name",
    "age",
    "weight",
    "height",
    "bmi",
    "question",
    "reply",
    "source",
];

/// CSV export row for chat data
#[derive(Debug, Clone, Serialize)]
pub struct ChatCsvRow {
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

impl From<ChatLogRecord> for ChatCsvRow {
    fn from(record: ChatLogRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            name: record.name,
            age: record.age,
            weight: record.weight,
            height: record.height,
            bmi: record.bmi,
            question: record.question,
            reply: record.reply,
            source: record.source,
        }
    }
}

/// Data export service
pub struct ExportService;

impl ExportService {
    /// Export the whole chat history as CSV
    pub async fn export_chat_csv(pool: &SqlitePool) -> Result<String, ApiError> {
        let records = ChatLogRepository::get_all(pool)
            .await
            .map_err(ApiError::Internal)?;

        let rows: Vec<ChatCsvRow> = records.into_iter().map(ChatCsvRow::from).collect();
        Self::to_csv(&rows)
    }

    /// Convert rows to a CSV string, header first even when there are no rows
    pub fn to_csv(rows: &[ChatCsvRow]) -> Result<String, ApiError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(vec![]);

        wtr.write_record(CSV_HEADER)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV header error: {}", e)))?;
        for row in rows {
            wtr.serialize(row)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
