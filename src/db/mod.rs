//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    /// Archived per-user per-date rollups (doc ID: `{user_id}_{date}`)
    pub const DAILY_HISTORY: &str = "daily_history";
}
