// SPDX-License-Identifier: MIT

//! Dashboard summary routes.
//!
//! Each handler resolves "today", pulls the relevant snapshot from the
//! store and hands it to the pure aggregators in `models::summary`. The
//! view models are recomputed on every request and never cached.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::summary::{self, DailySummary, HeatmapCell, WeeklySummary, HEATMAP_DAYS};
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;

/// Upper bound on activities fetched per summary window. A user logging
/// every hour for a week stays far below this.
const SNAPSHOT_LIMIT: u32 = 2000;

/// Summary routes (require authentication via JWT).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/summary/daily", get(get_daily_summary))
        .route("/api/summary/weekly", get(get_weekly_summary))
        .route("/api/summary/heatmap", get(get_heatmap))
}

#[derive(Deserialize)]
struct SummaryQuery {
    /// Reference date; defaults to today (UTC). Clients in other time
    /// zones resolve their own "today" and pass it here.
    date: Option<NaiveDate>,
}

/// Today's total, count and activity list.
async fn get_daily_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<DailySummary>> {
    let today = params.date.unwrap_or_else(today_utc);

    let activities = state
        .db
        .get_activities_for_user(&user.user_id, Some(today), Some(today), SNAPSHOT_LIMIT)
        .await?;

    Ok(Json(DailySummary::compute(&activities, today)))
}

/// Trailing-week rollup with category breakdown and week-over-week delta.
async fn get_weekly_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<WeeklySummary>> {
    let today = params.date.unwrap_or_else(today_utc);
    let window_start = today - Duration::days(6);
    let prev_start = today - Duration::days(13);
    let prev_end = today - Duration::days(7);

    let activities = state
        .db
        .get_activities_for_user(&user.user_id, Some(window_start), Some(today), SNAPSHOT_LIMIT)
        .await?;
    let history = state
        .db
        .get_daily_history(&user.user_id, prev_start, prev_end)
        .await?;

    Ok(Json(WeeklySummary::compute(&activities, &history, today)))
}

/// 12-week emission heatmap grid.
async fn get_heatmap(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<Vec<HeatmapCell>>> {
    let today = params.date.unwrap_or_else(today_utc);
    let window_start = today - Duration::days(6);
    let grid_start = today - Duration::days(HEATMAP_DAYS - 1);

    // Recent dates come from fine-grained activities, everything older
    // from the archived rollups.
    let activities = state
        .db
        .get_activities_for_user(&user.user_id, Some(window_start), Some(today), SNAPSHOT_LIMIT)
        .await?;
    let history = state
        .db
        .get_daily_history(&user.user_id, grid_start, today)
        .await?;

    Ok(Json(summary::heatmap(&activities, &history, today)))
}
