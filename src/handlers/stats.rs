use axum::{extract::State, response::IntoResponse, Json};

use crate::errors::ServiceError;
use crate::AppState;

/// Warehouse statistics snapshot.
#[utoipa::path(
    get,
    path = "/api/warehouse/stats",
    responses(
        (status = 200, description = "Zone utilization, category breakdown and expiry counts", body = crate::services::stats::WarehouseStats),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "stats"
)]
pub async fn warehouse_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServiceError> {
    let stats = state.stats_service.warehouse_stats().await?;
    Ok(Json(stats))
}
