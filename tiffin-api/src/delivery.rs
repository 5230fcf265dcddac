use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tiffin_core::geo::GeoPoint;
use tiffin_shared::events::FeeQuotedEvent;
use tiffin_shared::StorefrontEvent;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ConfirmFeeRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct ConfirmFeeResponse {
    pub distance: f64,
    pub fee: i32,
    /// Estimated delivery time in minutes.
    pub time: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/delivery/confirm-fee", post(confirm_fee))
}

/// POST /v1/delivery/confirm-fee
/// Server-authoritative serviceability check used before final submission;
/// the client-side quote is advisory only
pub async fn confirm_fee(
    State(state): State<AppState>,
    Json(req): Json<ConfirmFeeRequest>,
) -> Result<Json<ConfirmFeeResponse>, AppError> {
    let point = GeoPoint::new(req.latitude, req.longitude);
    let quote = state.evaluator.evaluate(point);

    let _ = state.events_tx.send(StorefrontEvent::FeeQuoted(FeeQuotedEvent {
        latitude: req.latitude,
        longitude: req.longitude,
        distance_km: quote.distance_km,
        fee: quote.fee,
        serviceable: quote.serviceable,
        timestamp: Utc::now().timestamp(),
    }));

    if !quote.serviceable {
        return Err(AppError::UnprocessableError(quote.message));
    }

    Ok(Json(ConfirmFeeResponse {
        distance: quote.distance_km,
        fee: quote.fee,
        time: quote.eta_minutes,
    }))
}
