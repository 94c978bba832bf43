//! Request handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tally_core::{calculate_points, Points, Receipt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Body of a successful `POST /receipts/process`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessReceiptResponse {
    pub id: String,
}

/// Body of a successful `GET /receipts/{id}/points`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: Points,
}

/// Scores a receipt and stores its points under a new id.
///
/// The body is decoded by hand so any content type is accepted and every
/// decode failure maps to 400. Fields that decode but do not parse (a bad
/// total, price, date or time) only flag the receipt.
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProcessReceiptResponse>> {
    let receipt: Receipt = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Error decoding request body");
        ApiError::MalformedPayload(e.to_string())
    })?;

    let id = Uuid::new_v4().to_string();
    let card = calculate_points(&receipt);

    for error in &card.errors {
        warn!(receipt_id = %id, field = error.field(), %error, "Calculation error");
    }
    debug!(
        receipt_id = %id,
        retailer = card.breakdown.retailer,
        total = card.breakdown.total,
        items = card.breakdown.items,
        date_time = card.breakdown.date_time,
        "Points breakdown"
    );

    state.store.put(&id, card.points)?;
    info!(
        receipt_id = %id,
        points = card.points,
        calculation_error = card.had_error(),
        "Processed receipt"
    );

    Ok(Json(ProcessReceiptResponse { id }))
}

/// Looks up the points stored for a receipt.
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = state
        .store
        .get(&id)?
        .ok_or(ApiError::ReceiptNotFound { id })?;

    Ok(Json(PointsResponse { points }))
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
