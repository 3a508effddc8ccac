use axum::Json;

use crate::api::response::ApiResponse;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("Server is running"))
}
