// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User stats (gamification record per user)
//! - Peer chats (two-party pairing slots)
//! - Peer messages
//! - Lesson progress (completion records)
//!
//! All operations are single reads or single unconditional writes. There is
//! no transaction or version check anywhere in this layer: stats updates are
//! last-writer-wins and the pairing lookup-then-claim sequence has a known
//! race window (two concurrent first-time requesters can each create an open
//! chat instead of pairing with each other). Callers get the documented
//! semantics, not stronger ones.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{LessonProgress, PeerChat, PeerMessage, UserStats};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Stats Operations ──────────────────────────────────

    /// Get the stats record for a user, if one exists.
    ///
    /// Absence is not an error: the service layer creates a default record
    /// on first read. Any store failure maps to `AppError::Database`.
    pub async fn get_user_stats(&self, user_id: &str) -> Result<Option<UserStats>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USER_STATS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a stats record, overwriting whatever is there.
    pub async fn set_user_stats(&self, stats: &UserStats) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_STATS)
            .document_id(&stats.user_id)
            .object(stats)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Peer Chat Operations ───────────────────────────────────

    /// Find a chat the user is already part of (either side).
    ///
    /// At most one is expected; if duplicates exist from a past race, the
    /// first match is returned.
    pub async fn get_chat_for_user(&self, user_id: &str) -> Result<Option<PeerChat>, AppError> {
        let user_a = user_id.to_string();
        let user_b = user_id.to_string();
        let chats: Vec<PeerChat> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::PEER_CHATS)
            .filter(move |q| {
                q.for_any([
                    q.field("user_a").eq(user_a.clone()),
                    q.field("user_b").eq(user_b.clone()),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(chats.into_iter().next())
    }

    /// Find an open chat created by someone else (`user_b` unset).
    pub async fn find_open_chat_excluding(
        &self,
        user_id: &str,
    ) -> Result<Option<PeerChat>, AppError> {
        let user_id = user_id.to_string();
        let chats: Vec<PeerChat> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::PEER_CHATS)
            .filter(move |q| {
                q.for_all([
                    q.field("user_b").is_null(),
                    q.field("user_a").neq(user_id.clone()),
                ])
            })
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(chats.into_iter().next())
    }

    /// Create or overwrite a chat document.
    pub async fn set_chat(&self, chat: &PeerChat) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PEER_CHATS)
            .document_id(&chat.id)
            .object(chat)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a chat by ID.
    pub async fn get_chat(&self, chat_id: &str) -> Result<Option<PeerChat>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PEER_CHATS)
            .obj()
            .one(chat_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Peer Message Operations ────────────────────────────────

    /// Store a message.
    pub async fn set_message(&self, message: &PeerMessage) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PEER_MESSAGES)
            .document_id(&message.id)
            .object(message)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get all messages in a chat, newest first.
    pub async fn get_messages_for_chat(
        &self,
        chat_id: &str,
    ) -> Result<Vec<PeerMessage>, AppError> {
        let chat_id = chat_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::PEER_MESSAGES)
            .filter(move |q| q.field("chat_id").eq(chat_id.clone()))
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Lesson Progress Operations ─────────────────────────────

    /// Store a lesson completion record (upsert).
    ///
    /// Document ID: combine user_id and lesson_id to make re-completion
    /// idempotent.
    pub async fn set_lesson_progress(&self, progress: &LessonProgress) -> Result<(), AppError> {
        let doc_id = lesson_progress_doc_id(&progress.user_id, &progress.lesson_id);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::LESSON_PROGRESS)
            .document_id(&doc_id)
            .object(progress)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get all completion records for a user.
    pub async fn get_lesson_progress_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<LessonProgress>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::LESSON_PROGRESS)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Composite document ID for a lesson completion record.
fn lesson_progress_doc_id(user_id: &str, lesson_id: &str) -> String {
    format!(
        "{}_{}",
        urlencoding::encode(user_id),
        urlencoding::encode(lesson_id)
    )
}
