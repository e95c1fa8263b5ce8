//! Chat service - picks a reply, records the interaction, adds flavor
//!
//! Every path produces a reply. Generator failures fall back to the offline
//! coach; record store failures are logged and dropped.

use crate::generator::{prompts::coaching_prompt, TextGenerator};
use crate::repositories::{ChatLogRepository, CreateChatLog};
use crate::state::AppState;
use chrono::Utc;
use health_coach_shared::{
    bmi_status, calculate_bmi, offline_reply, ChatInput, ChatResponse, Profile, ReplySource,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// A reply and how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
    pub bmi: Option<f64>,
}

/// Chat service
pub struct ChatService;

impl ChatService {
    /// Answer one question: compose the reply, record it, attach flavor
    pub async fn respond(state: &AppState, input: &ChatInput) -> ChatResponse {
        let composed = Self::compose_reply(state.generator(), &input.profile, &input.question).await;

        Self::record(state.db(), input, &composed).await;

        let flavor = state.roll_flavor();

        info!(
            source = %composed.source,
            bmi = ?composed.bmi,
            "Answered chat question"
        );

        ChatResponse {
            bmi_status: bmi_status(composed.bmi).to_string(),
            reply: composed.reply,
            bmi: composed.bmi,
            steps_today: flavor.steps_today,
            reminder: flavor.reminder.to_string(),
        }
    }

    /// Pick the reply for a question
    ///
    /// Tries the generator when present; any error or blank answer yields the
    /// offline coach's reply for the same inputs.
    pub async fn compose_reply(
        generator: Option<&dyn TextGenerator>,
        profile: &Profile,
        question: &str,
    ) -> ChatReply {
        let bmi = calculate_bmi(profile.weight_kg, profile.height_cm);

        if let Some(generator) = generator {
            let prompt = coaching_prompt(profile, bmi, question);
            match generator.generate(&prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    return ChatReply {
                        reply: text,
                        source: ReplySource::Llm,
                        bmi,
                    };
                }
                Ok(_) => warn!("Generator returned blank text, using offline coach"),
                Err(e) => warn!("Generator call failed: {}, using offline coach", e),
            }
        }

        ChatReply {
            reply: offline_reply(profile, bmi, question),
            source: ReplySource::Offline,
            bmi,
        }
    }

    /// Append the interaction to the record store
    ///
    /// Returns the new entry id, or `None` when the write failed.
    pub async fn record(pool: &SqlitePool, input: &ChatInput, reply: &ChatReply) -> Option<i64> {
        let entry = CreateChatLog {
            created_at: Utc::now(),
            name: input.profile.name.clone(),
            age: input.profile.age,
            weight_kg: input.profile.weight_kg,
            height_cm: input.profile.height_cm,
            bmi: reply.bmi,
            question: input.question.clone(),
            reply: reply.reply.clone(),
            source: reply.source,
        };

        match ChatLogRepository::create(pool, entry).await {
            Ok(id) => {
                debug!(id, "Chat log entry stored");
                Some(id)
            }
            Err(e) => {
                warn!("Failed to store chat log entry: {:#}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::generator::GeneratorError;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator that always fails
    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GeneratorError> {
            Err(GeneratorError::UnrecognizedShape)
        }
    }

    /// Generator that returns a fixed reply and counts calls
    struct FixedGenerator {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
            assert!(prompt.contains("Question: "));
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    fn profile(weight_kg: f64, height_cm: f64) -> Profile {
        Profile {
            name: "Asha".to_string(),
            age: 30,
            weight_kg,
            height_cm,
        }
    }

    #[tokio::test]
    async fn test_no_generator_uses_offline_coach() {
        let p = profile(70.0, 170.0);
        let reply = ChatService::compose_reply(None, &p, "What should I eat?").await;
        assert_eq!(reply.source, ReplySource::Offline);
        assert_eq!(reply.bmi, Some(24.22));
        assert_eq!(reply.reply, offline_reply(&p, Some(24.22), "What should I eat?"));
    }

    #[tokio::test]
    async fn test_generator_reply_is_used() {
        let generator = FixedGenerator {
            reply: "Eat more greens.",
            calls: AtomicUsize::new(0),
        };
        let reply =
            ChatService::compose_reply(Some(&generator), &profile(70.0, 170.0), "food?").await;
        assert_eq!(reply.source, ReplySource::Llm);
        assert_eq!(reply.reply, "Eat more greens.");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_generator_reply_falls_back() {
        let generator = FixedGenerator {
            reply: "  ",
            calls: AtomicUsize::new(0),
        };
        let reply =
            ChatService::compose_reply(Some(&generator), &profile(70.0, 170.0), "food?").await;
        assert_eq!(reply.source, ReplySource::Offline);
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        // No migrations: the table does not exist.
        let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
        let input = ChatInput {
            profile: profile(70.0, 170.0),
            question: "hi".to_string(),
        };
        let reply = ChatService::compose_reply(None, &input.profile, &input.question).await;
        assert_eq!(ChatService::record(&pool, &input, &reply).await, None);
    }

    #[tokio::test]
    async fn test_record_stores_inputs_with_bmi() {
        let pool = db::create_pool("sqlite::memory:", 1).await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        let input = ChatInput {
            profile: profile(50.0, 170.0),
            question: "diet plan".to_string(),
        };
        let reply = ChatService::compose_reply(None, &input.profile, &input.question).await;
        assert!(ChatService::record(&pool, &input, &reply).await.is_some());

        let stored = ChatLogRepository::get_all(&pool).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].weight, Some(50.0));
        assert_eq!(stored[0].height, Some(170.0));
        assert_eq!(stored[0].bmi, Some(17.3));
        assert_eq!(stored[0].reply.as_deref(), Some(reply.reply.as_str()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Property: a failing generator yields exactly the offline reply
        #[test]
        fn prop_failed_generator_matches_offline(
            weight in 30.0f64..200.0,
            height in -10.0f64..220.0,
            question in ".{0,40}"
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let p = profile(weight, height);
            let with_failure = rt.block_on(
                ChatService::compose_reply(Some(&FailingGenerator), &p, &question)
            );
            let without = rt.block_on(ChatService::compose_reply(None, &p, &question));
            prop_assert_eq!(with_failure, without);
        }
    }
}
