// SPDX-License-Identifier: MIT

//! Archived per-user per-date emission rollups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One archived day of activity for one user.
///
/// Written by the daily rollup job the day after the activities occurred,
/// keyed by `(user_id, date)` so a retried rollup overwrites instead of
/// duplicating. Supersedes fine-grained `Activity` rows for older dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHistory {
    pub user_id: String,
    pub date: NaiveDate,
    pub total_emission_kg: f64,
    pub activity_count: u32,
}

impl DailyHistory {
    /// Firestore document ID. Deterministic per `(user_id, date)` so upserts
    /// for the same key land on the same document.
    pub fn doc_id(&self) -> String {
        format!("{}_{}", self.user_id, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_id_is_stable_per_user_and_date() {
        let row = DailyHistory {
            user_id: "u-42".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            total_emission_kg: 12.5,
            activity_count: 4,
        };

        assert_eq!(row.doc_id(), "u-42_2025-03-09");

        // Same key, different totals: same document, so a retry overwrites.
        let retried = DailyHistory {
            total_emission_kg: 12.5,
            ..row.clone()
        };
        assert_eq!(row.doc_id(), retried.doc_id());
    }
}
