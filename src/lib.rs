// SPDX-License-Identifier: MIT

//! LearnLoop: gamified learning-progress backend
//!
//! This crate provides the backend API for a mobile learning app: per-user
//! gamification stats (XP, streaks, energy), lesson completion records, and
//! peer chat pairing. All durable state lives in Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{PairingService, ProgressService, StatsService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub stats_service: StatsService,
    pub pairing_service: PairingService,
    pub progress_service: ProgressService,
}
