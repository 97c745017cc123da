// SPDX-License-Identifier: MIT

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{LessonProgress, PeerMessage, ProgressDelta, UserStats};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/progress", post(post_progress))
        .route("/api/lessons/{lesson_id}/complete", post(complete_lesson))
        .route("/api/lessons/progress", get(get_lesson_progress))
        .route("/api/pairing", post(request_pairing))
        .route(
            "/api/pairing/{chat_id}/messages",
            get(get_messages).post(post_message),
        )
}

// ─── Stats ───────────────────────────────────────────────────

/// Stats as returned to the client.
#[derive(Serialize)]
pub struct StatsResponse {
    pub xp: u32,
    pub streak: u32,
    pub energy: i32,
    pub last_active: Option<String>,
}

impl From<UserStats> for StatsResponse {
    fn from(stats: UserStats) -> Self {
        Self {
            xp: stats.xp,
            streak: stats.streak,
            energy: stats.energy,
            last_active: stats.last_active.map(|d| d.to_string()),
        }
    }
}

/// Get current user's gamification stats (created on first read).
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StatsResponse>> {
    let stats = state.stats_service.get_or_create(&user.user_id).await?;
    Ok(Json(stats.into()))
}

/// Apply a progress delta (quiz passed, practice session, ...).
async fn post_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(delta): Json<ProgressDelta>,
) -> Result<Json<StatsResponse>> {
    let stats = state
        .stats_service
        .apply_progress(&user.user_id, &delta)
        .await?;
    Ok(Json(stats.into()))
}

// ─── Lessons ─────────────────────────────────────────────────

/// Mark a lesson completed; returns the stats after the award.
async fn complete_lesson(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(lesson_id): Path<String>,
) -> Result<Json<StatsResponse>> {
    if lesson_id.trim().is_empty() {
        return Err(AppError::BadRequest("Lesson ID is empty".to_string()));
    }

    let stats = state
        .progress_service
        .complete_lesson(&user.user_id, &lesson_id)
        .await?;
    Ok(Json(stats.into()))
}

#[derive(Serialize)]
pub struct LessonProgressResponse {
    pub lessons: Vec<LessonProgress>,
}

/// Get all lesson completion records for the current user.
async fn get_lesson_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<LessonProgressResponse>> {
    let lessons = state.progress_service.list_progress(&user.user_id).await?;
    Ok(Json(LessonProgressResponse { lessons }))
}

// ─── Pairing ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PairingResponse {
    pub chat_id: String,
    pub user_a: String,
    pub user_b: Option<String>,
    /// True while waiting for a second party
    pub open: bool,
}

/// Find or create a peer chat for the current user.
async fn request_pairing(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PairingResponse>> {
    let chat = state.pairing_service.find_or_create(&user.user_id).await?;

    let open = chat.is_open();
    Ok(Json(PairingResponse {
        chat_id: chat.id,
        user_a: chat.user_a,
        user_b: chat.user_b,
        open,
    }))
}

#[derive(Deserialize)]
struct SendMessageRequest {
    body: String,
}

/// Send a message into the user's peer chat.
async fn post_message(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(chat_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<PeerMessage>> {
    let message = state
        .pairing_service
        .send_message(&chat_id, &user.user_id, &req.body)
        .await?;
    Ok(Json(message))
}

#[derive(Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<PeerMessage>,
}

/// List messages in the user's peer chat, newest first.
async fn get_messages(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(chat_id): Path<String>,
) -> Result<Json<MessagesResponse>> {
    let messages = state
        .pairing_service
        .list_messages(&chat_id, &user.user_id)
        .await?;
    Ok(Json(MessagesResponse { messages }))
}
