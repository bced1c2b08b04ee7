//! User profile model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Identity and sessions come from the external auth provider; this record
/// only holds what the dashboard needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Auth-provider subject ID (also used as document ID)
    pub user_id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    /// Display name
    pub display_name: String,
    /// Weekly emission goal in kg CO2, if the user set one
    pub weekly_target_kg: Option<f64>,
    /// When the user first signed in
    pub created_at: String,
    /// Last activity timestamp
    pub last_active: String,
}
