// SPDX-License-Identifier: MIT

use learnloop::config::Config;
use learnloop::db::FirestoreDb;
use learnloop::routes::create_router;
use learnloop::services::{PairingService, ProgressService, StatsService};
use learnloop::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Generate a unique user ID for test isolation.
#[allow(dead_code)]
pub fn unique_user_id(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Build the full service stack on top of a database connection.
#[allow(dead_code)]
pub fn build_state(config: Config, db: FirestoreDb) -> Arc<AppState> {
    let stats_service = StatsService::new(db.clone());
    let pairing_service = PairingService::new(db.clone());
    let progress_service = ProgressService::new(db.clone(), stats_service.clone());

    Arc::new(AppState {
        config,
        db,
        stats_service,
        pairing_service,
        progress_service,
    })
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = build_state(Config::test_default(), test_db_offline());
    (create_router(state.clone()), state)
}
