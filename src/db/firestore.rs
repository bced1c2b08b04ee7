// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Activities (classified emission records)
//! - Daily history (archived rollups, upserted by the rollup job)

use chrono::NaiveDate;
use futures_util::{stream, StreamExt};

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Activity, DailyHistory, NewActivity, User};
use crate::time_utils::format_utc_rfc3339;

const MAX_CONCURRENT_DB_OPS: usize = 50;
// Firestore limits transaction writes to 500 operations; stay under it.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::new_emulator(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Emulator connection with a dummy token, so local runs need no
    /// Google credentials.
    async fn new_emulator(project_id: &str) -> Result<Self, AppError> {
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
            AppError::Database(format!("Failed to connect to Firestore emulator: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore (emulator)");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock client for testing (offline mode).
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

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user profile.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.user_id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Insert a new activity.
    ///
    /// The store assigns the ID and creation timestamp; everything else
    /// comes from the caller, classification already applied.
    pub async fn insert_activity(
        &self,
        user_id: &str,
        new: &NewActivity,
    ) -> Result<Activity, AppError> {
        let activity = Activity {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            description: new.description.clone(),
            category: new.category,
            emission_kg: new.emission_kg,
            activity_date: new.activity_date,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&activity.id)
            .object(&activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(activity)
    }

    /// Get an activity by ID.
    pub async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(activity_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's activities, optionally bounded by an inclusive date
    /// range on `activity_date`, newest first by creation time.
    pub async fn get_activities_for_user(
        &self,
        user_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: u32,
    ) -> Result<Vec<Activity>, AppError> {
        let user_id = user_id.to_string();
        let from = from.map(|d| d.to_string());
        let to = to.map(|d| d.to_string());

        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| {
                let mut conditions = vec![q.field("user_id").eq(user_id.clone())];
                if let Some(from) = &from {
                    conditions
                        .push(q.field("activity_date").greater_than_or_equal(from.clone()));
                }
                if let Some(to) = &to {
                    conditions.push(q.field("activity_date").less_than_or_equal(to.clone()));
                }
                q.for_all(conditions)
            })
            .order_by([(
                "created_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get every user's activities for one calendar date (rollup input).
    pub async fn get_activities_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Activity>, AppError> {
        let date = date.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.field("activity_date").eq(date.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Overwrite a stored activity (user edits; classification untouched).
    pub async fn update_activity(&self, activity: &Activity) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&activity.id)
            .object(activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete an activity document.
    pub async fn delete_activity(&self, activity_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::ACTIVITIES)
            .document_id(activity_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Daily History Operations ───────────────────────────────

    /// Get a user's archived rollups for an inclusive date range.
    pub async fn get_daily_history(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyHistory>, AppError> {
        let user_id = user_id.to_string();
        let from = from.to_string();
        let to = to.to_string();

        self.get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_HISTORY)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("date").greater_than_or_equal(from.clone()),
                    q.field("date").less_than_or_equal(to.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Upsert one rollup row, keyed by `(user_id, date)`.
    ///
    /// The deterministic document ID makes the write idempotent: a retried
    /// rollup overwrites the same document rather than duplicating it.
    pub async fn upsert_daily_history(&self, row: &DailyHistory) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::DAILY_HISTORY)
            .document_id(row.doc_id())
            .object(row)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Upsert many rollup rows with bounded concurrency.
    pub async fn batch_upsert_daily_history(
        &self,
        rows: &[DailyHistory],
    ) -> Result<(), AppError> {
        stream::iter(rows.to_vec())
            .map(|row| async move { self.upsert_daily_history(&row).await })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), AppError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, AppError>>()?;

        Ok(())
    }

    // ─── User Data Deletion ─────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    /// Delete ALL data for a user: activities, archived history, profile.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_user_data(&self, user_id: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        // 1. All fine-grained activities
        let owner = user_id.to_string();
        let activities: Vec<Activity> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.field("user_id").eq(owner.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let count = activities.len();
        self.batch_delete(&activities, collections::ACTIVITIES, |a: &Activity| {
            a.id.clone()
        })
        .await?;
        deleted_count += count;
        tracing::debug!(user_id, count, "Deleted activities");

        // 2. All archived rollups
        let owner = user_id.to_string();
        let history: Vec<DailyHistory> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::DAILY_HISTORY)
            .filter(move |q| q.field("user_id").eq(owner.clone()))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let count = history.len();
        self.batch_delete(&history, collections::DAILY_HISTORY, |h: &DailyHistory| {
            h.doc_id()
        })
        .await?;
        deleted_count += count;
        tracing::debug!(user_id, count, "Deleted daily history");

        // 3. Profile
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(user_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        deleted_count += 1;

        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
