use axum::{extract::State, Json};

use crate::{
    api::{error::ApiError, extractors::SnapshotExtractor, response::ApiResponse},
    finance_store::models::FinanceSnapshot,
    utils::app_config::AppConfig,
};

/// GET /api/data - Full snapshot of the tenant's finances
pub async fn get_data(
    State(app_config): State<AppConfig>,
) -> Result<Json<ApiResponse<FinanceSnapshot>>, ApiError> {
    let snapshot = app_config.store.fetch_all(app_config.tenant).await?;

    tracing::debug!(
        transactions = snapshot.transactions.len(),
        categories = snapshot.categories.len(),
        "Loaded finance snapshot"
    );

    Ok(Json(ApiResponse::success(snapshot)))
}

/// POST /api/data - Replace the stored state with the submitted snapshot
///
/// Anything not present in the body is discarded; this is a full replace,
/// not a merge.
pub async fn save_data(
    State(app_config): State<AppConfig>,
    SnapshotExtractor(snapshot): SnapshotExtractor,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let summary = app_config
        .store
        .replace_all(app_config.tenant, snapshot)
        .await?;

    tracing::info!(
        transactions = summary.transactions,
        categories = summary.categories,
        goals = summary.goals,
        achievements = summary.achievements,
        "Saved finance snapshot"
    );

    Ok(Json(ApiResponse::message("Data saved successfully")))
}

/// POST /api/reset - Drop every record and zero the profile
pub async fn reset_data(
    State(app_config): State<AppConfig>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    app_config.store.reset_all(app_config.tenant).await?;

    tracing::info!(tenant = app_config.tenant.user_id, "Reset all finance data");

    Ok(Json(ApiResponse::message("All data reset successfully")))
}
