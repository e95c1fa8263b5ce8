//! Chat log repository for the append-only record store

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use health_coach_shared::{ChatLogEntry, ReplySource};
use sqlx::SqlitePool;

/// Chat log record from database
///
/// `created_at` is kept as stored text; rows written by older versions use
/// naive ISO timestamps.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatLogRecord {
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

impl From<ChatLogRecord> for ChatLogEntry {
    fn from(record: ChatLogRecord) -> Self {
        ChatLogEntry {
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

/// Input for appending a chat log entry
#[derive(Debug, Clone)]
pub struct CreateChatLog {
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: Option<f64>,
    pub question: String,
    pub reply: String,
    pub source: ReplySource,
}

/// Chat log repository for database operations
pub struct ChatLogRepository;

impl ChatLogRepository {
    /// Append a chat log entry, returning its id
    pub async fn create(pool: &SqlitePool, input: CreateChatLog) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO chats (created_at, name, age, weight, height, bmi, question, reply, source)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(&input.name)
        .bind(input.age)
        .bind(input.weight_kg)
        .bind(input.height_cm)
        .bind(input.bmi)
        .bind(&input.question)
        .bind(&input.reply)
        .bind(input.source.as_str())
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get the N most recent entries, newest first
    pub async fn get_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<ChatLogRecord>> {
        let records = sqlx::query_as::<_, ChatLogRecord>(
            r#"
            SELECT id, created_at, name, age, weight, height, bmi, question, reply, source
            FROM chats
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get every entry, newest first
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<ChatLogRecord>> {
        let records = sqlx::query_as::<_, ChatLogRecord>(
            r#"
            SELECT id, created_at, name, age, weight, height, bmi, question, reply, source
            FROM chats
            ORDER BY id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
