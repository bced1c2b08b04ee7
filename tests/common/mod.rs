// SPDX-License-Identifier: MIT

use carbonlog::config::Config;
use carbonlog::db::FirestoreDb;
use carbonlog::routes::create_router;
use carbonlog::services::Classifier;
use carbonlog::AppState;
use std::sync::Arc;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test JWT for the given user.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    carbonlog::middleware::auth::create_jwt(user_id, signing_key).expect("test jwt")
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let classifier = Classifier::default();

    let state = Arc::new(AppState {
        config,
        db,
        classifier,
    });

    (create_router(state.clone()), state)
}
