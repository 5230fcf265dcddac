use crate::cart::{load_registry, persist_registry};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tiffin_core::geo::GeoPoint;
use tiffin_order::{
    CheckoutError, CheckoutFlow, CustomerDetails, PlacedOrderStatus,
};
use tiffin_shared::events::OrderPlacedEvent;
use tiffin_shared::{Masked, StorefrontEvent};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: Option<String>,
}

impl From<CustomerPayload> for CustomerDetails {
    fn from(payload: CustomerPayload) -> Self {
        CustomerDetails {
            name: payload.name,
            phone: Masked::new(payload.phone),
            address: payload.address,
            email: payload.email.map(Masked::new),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    pub latitude: f64,
    pub longitude: f64,
    pub customer: CustomerPayload,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
    pub status: PlacedOrderStatus,
    pub subtotal: i32,
    pub delivery_fee: i32,
    pub total: i32,
    pub distance_km: f64,
    pub eta_minutes: u32,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/carts/{session_id}/categories/{category_id}/checkout",
        post(checkout),
    )
}

fn checkout_error(err: CheckoutError) -> AppError {
    match err {
        CheckoutError::EmptyCart(category) => {
            AppError::NotFoundError(format!("No cart to check out for category {}", category))
        }
        CheckoutError::OutsideServiceArea { .. } | CheckoutError::BelowMinimumOrder { .. } => {
            AppError::UnprocessableError(err.to_string())
        }
        CheckoutError::PlacementFailed(msg) => AppError::UpstreamError(msg),
    }
}

// ============================================================================
// Handler
// ============================================================================

/// POST /v1/carts/:session_id/categories/:category_id/checkout
/// Freeze the category cart into an order request and hand it to the
/// order-placement collaborator; the cart survives a failed placement
pub async fn checkout(
    State(state): State<AppState>,
    Path((session_id, category_id)): Path<(String, String)>,
    Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let mut registry = load_registry(&state, &session_id).await?;
    let point = GeoPoint::new(body.latitude, body.longitude);
    let customer: CustomerDetails = body.customer.into();

    let mut flow = CheckoutFlow::new();
    flow.start_preparing()?;

    let request = match state
        .orchestrator
        .prepare_checkout(&registry, &category_id, point)
    {
        Ok(request) => {
            flow.mark_ready()?;
            request
        }
        Err(err) => {
            flow.mark_rejected()?;
            return Err(checkout_error(err));
        }
    };

    flow.start_submitting()?;

    match state
        .orchestrator
        .commit_checkout(&mut registry, &request, &customer)
        .await
    {
        Ok(placed) => {
            flow.mark_committed()?;

            // The commit cleared the category cart; persist that state.
            persist_registry(&state, &session_id, &registry, &category_id).await?;

            let _ = state
                .events_tx
                .send(StorefrontEvent::OrderPlaced(OrderPlacedEvent {
                    order_id: placed.order_id,
                    session_id: session_id.clone(),
                    category_id: category_id.clone(),
                    total: request.total,
                    timestamp: Utc::now().timestamp(),
                }));

            Ok(Json(CheckoutResponse {
                order_id: placed.order_id,
                status: placed.status,
                subtotal: request.subtotal,
                delivery_fee: request.delivery_fee,
                total: request.total,
                distance_km: request.distance_km,
                eta_minutes: request.eta_minutes,
            }))
        }
        Err(err) => {
            flow.mark_failed()?;
            // No save: the in-memory registry is unchanged and the stored
            // snapshot still holds the cart for a retry.
            Err(checkout_error(err))
        }
    }
}
