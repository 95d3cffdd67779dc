use crate::types::StatusResponse;
use axum::Json;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Server is up", body = StatusResponse)
    ),
    tag = "health"
)]
pub async fn healthz() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}
