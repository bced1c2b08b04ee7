// SPDX-License-Identifier: MIT

//! Task handler routes for scheduled jobs.
//!
//! These endpoints are called by Cloud Scheduler via Cloud Tasks, not
//! directly by users.

use crate::error::Result;
use crate::services::ArchiveService;
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::HeaderMap,
    routing::post,
    Router,
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Task handler routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/daily-rollup", post(daily_rollup))
}

#[derive(Debug, Deserialize, Default)]
struct RollupRequest {
    /// Date to archive; defaults to yesterday (UTC)
    date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct RollupResponse {
    success: bool,
    date: NaiveDate,
    users_processed: u32,
    activities_archived: u32,
}

/// Archive one day of activities into daily history.
///
/// Idempotent: the rollup upserts rows keyed by `(user_id, date)`, so a
/// Cloud Tasks retry after a partial failure overwrites rather than
/// double-counts. Failures return 500 to trigger that retry.
async fn daily_rollup(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Option<Json<RollupRequest>>,
) -> Result<Json<RollupResponse>> {
    // Cloud Run strips this header from external requests, so its presence
    // guarantees internal origin; also verify the queue name matches.
    let queue_name_header = headers.get("x-cloudtasks-queuename");
    let is_valid_queue = queue_name_header
        .and_then(|h| h.to_str().ok())
        .map(|name| name == crate::config::ROLLUP_QUEUE_NAME)
        .unwrap_or(false);

    if !is_valid_queue {
        tracing::warn!(
            header = ?queue_name_header,
            "Security Alert: Blocked unauthorized access to daily_rollup"
        );
        return Err(crate::error::AppError::Unauthorized);
    }

    let request = payload.map(|Json(r)| r).unwrap_or_default();
    let date = request.date.unwrap_or_else(|| today_utc() - Duration::days(1));

    tracing::info!(date = %date, "Running daily rollup from scheduled task");

    let outcome = ArchiveService::new(state.db.clone()).rollup_for_date(date).await?;

    Ok(Json(RollupResponse {
        success: true,
        date: outcome.date,
        users_processed: outcome.users_processed,
        activities_archived: outcome.activities_archived,
    }))
}
