// SPDX-License-Identifier: MIT

//! Daily rollup of fine-grained activities into archived history.
//!
//! Runs once per day (triggered by the scheduler hitting the task route)
//! for the previous calendar date: groups that date's activities by user
//! and upserts one `DailyHistory` row per user. The rows are keyed by
//! `(user_id, date)`, so re-running the job for the same date overwrites
//! the same documents and never double-counts.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{Activity, DailyHistory};

/// Outcome of one rollup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupOutcome {
    pub date: NaiveDate,
    pub users_processed: u32,
    pub activities_archived: u32,
}

/// Group one date's activities into per-user history rows.
///
/// Pure; the returned rows are sorted by user so a re-run over the same
/// snapshot produces the same sequence.
pub fn rollup_rows(activities: &[Activity], date: NaiveDate) -> Vec<DailyHistory> {
    let mut per_user: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for activity in activities {
        let entry = per_user.entry(activity.user_id.as_str()).or_insert((0.0, 0));
        entry.0 += activity.emission_kg;
        entry.1 += 1;
    }

    per_user
        .into_iter()
        .map(|(user_id, (total_emission_kg, activity_count))| DailyHistory {
            user_id: user_id.to_string(),
            date,
            total_emission_kg,
            activity_count,
        })
        .collect()
}

/// Archival job service.
pub struct ArchiveService {
    db: FirestoreDb,
}

impl ArchiveService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Roll up all users' activities for `date` into daily history.
    ///
    /// Idempotent: the underlying writes are upserts keyed by
    /// `(user_id, date)`, so scheduler retries are safe.
    pub async fn rollup_for_date(&self, date: NaiveDate) -> Result<RollupOutcome> {
        let activities = self.db.get_activities_for_date(date).await?;
        let rows = rollup_rows(&activities, date);

        tracing::info!(
            date = %date,
            activities = activities.len(),
            users = rows.len(),
            "Archiving daily activity"
        );

        self.db.batch_upsert_daily_history(&rows).await?;

        Ok(RollupOutcome {
            date,
            users_processed: rows.len() as u32,
            activities_archived: activities.len() as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn make_activity(user: &str, emission: f64, day: NaiveDate) -> Activity {
        Activity {
            id: format!("{}-{}", user, emission),
            user_id: user.to_string(),
            description: "test".to_string(),
            category: Category::Other,
            emission_kg: emission,
            activity_date: day,
            created_at: "2025-06-02T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn groups_by_user_with_totals_and_counts() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let activities = vec![
            make_activity("alice", 2.0, date),
            make_activity("bob", 1.5, date),
            make_activity("alice", 3.0, date),
        ];

        let rows = rollup_rows(&activities, date);

        assert_eq!(rows.len(), 2);
        let alice = rows.iter().find(|r| r.user_id == "alice").unwrap();
        assert!((alice.total_emission_kg - 5.0).abs() < 1e-9);
        assert_eq!(alice.activity_count, 2);
        let bob = rows.iter().find(|r| r.user_id == "bob").unwrap();
        assert_eq!(bob.activity_count, 1);
    }

    #[test]
    fn empty_day_produces_no_rows() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(rollup_rows(&[], date).is_empty());
    }

    #[test]
    fn rows_are_ordered_and_stable_across_runs() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let activities = vec![
            make_activity("carol", 1.0, date),
            make_activity("alice", 2.0, date),
            make_activity("bob", 3.0, date),
        ];

        let first = rollup_rows(&activities, date);
        let second = rollup_rows(&activities, date);

        assert_eq!(first, second);
        let users: Vec<&str> = first.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(users, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn rollup_rows_key_to_one_document_per_user_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let activities = vec![
            make_activity("alice", 2.0, date),
            make_activity("alice", 3.0, date),
        ];

        let rows = rollup_rows(&activities, date);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].doc_id(), "alice_2025-06-01");
    }
}
