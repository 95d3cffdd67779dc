use crate::{
    api::handlers::rag::invalid_json,
    types::{FeedbackRecord, FeedbackRequest, Result, StatusResponse},
    AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

/// Record feedback on an answer
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = FeedbackRequest,
    responses(
        (status = 200, description = "Feedback recorded", body = StatusResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "feedback"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(payload) = payload.map_err(invalid_json)?;
    state.feedback.append(FeedbackRecord::from(payload)).await?;
    Ok(Json(StatusResponse::ok()))
}
