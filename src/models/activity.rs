// SPDX-License-Identifier: MIT

//! Activity model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Classification bucket for a logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    Transport,
    Food,
    Energy,
    Waste,
    Shopping,
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Transport,
        Category::Food,
        Category::Energy,
        Category::Waste,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Food => "food",
            Category::Energy => "energy",
            Category::Waste => "waste",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored activity record in Firestore.
///
/// `activity_date` is a plain calendar date, never a timestamp, so date
/// bucketing in the aggregators is exact. `created_at` is used only for
/// ordering and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Store-assigned UUID (also used as document ID)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Free-text description as the user typed it
    pub description: String,
    /// Category set at creation by the classifier or by explicit user edit
    pub category: Category,
    /// Estimated emission in kg CO2, fixed at creation time
    pub emission_kg: f64,
    /// Calendar date the activity is attributed to (YYYY-MM-DD)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub activity_date: NaiveDate,
    /// Creation timestamp (RFC3339)
    pub created_at: String,
}

/// Insert shape handed to the store. The store assigns `id`, `user_id`
/// and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    pub description: String,
    pub category: Category,
    pub emission_kg: f64,
    pub activity_date: NaiveDate,
}
