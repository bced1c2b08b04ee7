// SPDX-License-Identifier: MIT

//! Activity and profile routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, Category, NewActivity, User};
use crate::services::classifier::Classification;
use crate::services::export::activities_to_csv;
use crate::time_utils::{format_utc_rfc3339, today_utc};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const DEFAULT_LIST_LIMIT: u32 = 100;
const MAX_LIST_LIMIT: u32 = 500;
const EXPORT_LIMIT: u32 = 5000;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", post(log_activity).get(get_activities))
        .route(
            "/api/activities/{id}",
            put(update_activity).delete(delete_activity),
        )
        .route("/api/export/csv", get(export_csv))
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/account", delete(delete_account))
}

fn validate_request<T: Validate>(request: &T) -> Result<()> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

// ─── Log Activity ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct LogActivityRequest {
    /// Free-text description of what the user did
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    description: String,
    /// Defaults to today (UTC) when omitted
    activity_date: Option<NaiveDate>,
    /// Explicit category, overriding the classifier
    category: Option<Category>,
    /// Explicit emission estimate, overriding the classifier
    emission_kg: Option<f64>,
}

/// Response for a logged activity: the stored record plus what the
/// classifier made of the text (even when the user overrode it).
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogActivityResponse {
    pub activity: Activity,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub classified_category: Category,
    pub classified_emission_kg: f64,
}

/// Classify and store a free-text activity.
async fn log_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<LogActivityRequest>,
) -> Result<Json<LogActivityResponse>> {
    validate_request(&request)?;

    // The classifier's contract requires non-empty text; reject blank
    // input here at the boundary.
    if request.description.trim().is_empty() {
        return Err(AppError::BadRequest(
            "description must not be blank".to_string(),
        ));
    }
    if request.emission_kg.is_some_and(|kg| kg < 0.0) {
        return Err(AppError::BadRequest(
            "emission_kg must be non-negative".to_string(),
        ));
    }

    let Classification {
        category: classified_category,
        emission_kg: classified_emission_kg,
    } = state.classifier.classify(&request.description);

    let new = NewActivity {
        description: request.description,
        category: request.category.unwrap_or(classified_category),
        emission_kg: request.emission_kg.unwrap_or(classified_emission_kg),
        activity_date: request.activity_date.unwrap_or_else(today_utc),
    };

    let activity = state.db.insert_activity(&user.user_id, &new).await?;

    tracing::info!(
        user_id = %user.user_id,
        activity_id = %activity.id,
        category = %activity.category,
        emission_kg = activity.emission_kg,
        "Activity logged"
    );

    Ok(Json(LogActivityResponse {
        activity,
        classified_category,
        classified_emission_kg,
    }))
}

// ─── List Activities ─────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Case-insensitive substring match on the description
    q: Option<String>,
    /// Filter by category
    category: Option<Category>,
    /// Inclusive activity_date range
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    pub activities: Vec<Activity>,
    pub total: u32,
    pub total_emission_kg: f64,
}

/// Get the user's activities with optional filtering.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    if let Some(q) = &params.q {
        if q.len() > 200 {
            return Err(AppError::BadRequest(
                "search term too long (max 200 characters)".to_string(),
            ));
        }
    }
    if let (Some(from), Some(to)) = (params.from, params.to) {
        if from > to {
            return Err(AppError::BadRequest(
                "'from' must not be after 'to'".to_string(),
            ));
        }
    }

    let limit = params.limit.min(MAX_LIST_LIMIT);
    let mut activities = state
        .db
        .get_activities_for_user(&user.user_id, params.from, params.to, limit)
        .await?;

    // Search and category filtering happen in memory; the store only
    // narrows by owner and date range.
    if let Some(q) = &params.q {
        let needle = q.to_lowercase();
        activities.retain(|a| a.description.to_lowercase().contains(&needle));
    }
    if let Some(category) = params.category {
        activities.retain(|a| a.category == category);
    }

    let total_emission_kg = activities.iter().map(|a| a.emission_kg).sum();

    Ok(Json(ActivitiesResponse {
        total: activities.len() as u32,
        total_emission_kg,
        activities,
    }))
}

// ─── Edit / Delete Activity ──────────────────────────────────

#[derive(Deserialize, Validate)]
struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    description: Option<String>,
    category: Option<Category>,
}

/// Edit an activity's description and/or category.
///
/// Editing never re-runs classification: the stored emission estimate
/// stands until the user deletes and re-logs the activity.
async fn update_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<String>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<Json<Activity>> {
    validate_request(&request)?;

    let mut activity = fetch_owned_activity(&state, &user, &activity_id).await?;

    if let Some(description) = request.description {
        if description.trim().is_empty() {
            return Err(AppError::BadRequest(
                "description must not be blank".to_string(),
            ));
        }
        activity.description = description;
    }
    if let Some(category) = request.category {
        activity.category = category;
    }

    state.db.update_activity(&activity).await?;

    Ok(Json(activity))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Delete a single activity.
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let activity = fetch_owned_activity(&state, &user, &activity_id).await?;
    state.db.delete_activity(&activity.id).await?;

    tracing::info!(user_id = %user.user_id, activity_id = %activity.id, "Activity deleted");

    Ok(Json(DeleteResponse { success: true }))
}

/// Fetch an activity and verify ownership. A foreign activity reads as
/// not-found so the response doesn't reveal other users' record IDs.
async fn fetch_owned_activity(
    state: &AppState,
    user: &AuthUser,
    activity_id: &str,
) -> Result<Activity> {
    let not_found = || AppError::NotFound(format!("Activity {} not found", activity_id));

    let activity = state.db.get_activity(activity_id).await?.ok_or_else(not_found)?;
    if activity.user_id != user.user_id {
        return Err(not_found());
    }
    Ok(activity)
}

// ─── CSV Export ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ExportQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

/// Download the user's activity history as CSV.
async fn export_csv(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let activities = state
        .db
        .get_activities_for_user(&user.user_id, params.from, params.to, EXPORT_LIMIT)
        .await?;

    let csv = activities_to_csv(&activities)?;
    let filename = format!("activity-history-{}.csv", today_utc());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    ))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub weekly_target_kg: Option<f64>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            display_name: user.display_name,
            weekly_target_kg: user.weekly_target_kg,
            created_at: user.created_at,
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(profile.into()))
}

#[derive(Deserialize, Validate)]
struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    display_name: Option<String>,
    /// Weekly emission goal; cleared when explicitly set to null
    #[validate(range(min = 0.0, max = 10000.0, message = "must be 0-10000 kg"))]
    weekly_target_kg: Option<f64>,
}

/// Update profile settings, creating the profile on first write.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    validate_request(&request)?;

    let now = format_utc_rfc3339(chrono::Utc::now());
    let mut profile = state.db.get_user(&user.user_id).await?.unwrap_or(User {
        user_id: user.user_id.clone(),
        email: None,
        display_name: String::new(),
        weekly_target_kg: None,
        created_at: now.clone(),
        last_active: now.clone(),
    });

    if let Some(display_name) = request.display_name {
        profile.display_name = display_name;
    }
    if let Some(target) = request.weekly_target_kg {
        profile.weekly_target_kg = Some(target);
    }
    profile.last_active = now;

    state.db.upsert_user(&profile).await?;

    Ok(Json(profile.into()))
}

// ─── Account Deletion ────────────────────────────────────────

/// Response for account deletion.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_documents: u32,
}

/// Delete the user's account and all associated data.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DeleteAccountResponse>> {
    tracing::info!(user_id = %user.user_id, "User-initiated account deletion");

    let deleted = state.db.delete_user_data(&user.user_id).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_documents: deleted as u32,
    }))
}
