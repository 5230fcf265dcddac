use crate::error::{store_error, AppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tiffin_cart::{AddCheck, CartRegistry, NewCartItem, ValidatedCart};
use tiffin_shared::events::CartUpdatedEvent;
use tiffin_shared::StorefrontEvent;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub category_id: String,
    pub category_name: String,
    pub product_id: String,
    pub name: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub vendor_id: String,
    pub vendor_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub category_id: String,
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub category_id: String,
    pub product_id: String,
    /// Absolute quantity; zero or negative removes the line.
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartsResponse {
    pub carts: Vec<ValidatedCart>,
    pub total_items: u32,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/carts/{session_id}",
            get(get_carts).delete(clear_all_carts),
        )
        .route(
            "/v1/carts/{session_id}/items",
            post(add_item).delete(remove_item),
        )
        .route("/v1/carts/{session_id}/items/quantity", put(update_quantity))
        .route(
            "/v1/carts/{session_id}/categories/{category_id}",
            get(get_cart).delete(clear_cart),
        )
}

// ============================================================================
// Registry plumbing
// ============================================================================

/// Materialize the session's registry from its stored snapshot and lay the
/// admin-configured category minimums over it.
pub async fn load_registry(state: &AppState, session_id: &str) -> Result<CartRegistry, AppError> {
    let snapshot = state
        .cart_store
        .load(session_id)
        .await
        .map_err(store_error)?;

    let mut registry = match snapshot {
        Some(snapshot) => CartRegistry::from_snapshot(snapshot),
        None => CartRegistry::new(),
    };

    for (category_id, amount) in &state.category_minimums {
        registry.set_min_order_amount(category_id, *amount);
    }

    Ok(registry)
}

/// Persist the mutated registry, then notify subscribers. The save happens
/// strictly after the in-memory mutation; the broadcast is best-effort.
pub async fn persist_registry(
    state: &AppState,
    session_id: &str,
    registry: &CartRegistry,
    category_id: &str,
) -> Result<(), AppError> {
    state
        .cart_store
        .save(session_id, &registry.snapshot())
        .await
        .map_err(store_error)?;

    let _ = state
        .events_tx
        .send(StorefrontEvent::CartUpdated(CartUpdatedEvent {
            session_id: session_id.to_string(),
            category_id: category_id.to_string(),
            total_items: registry.total_items(None),
            timestamp: Utc::now().timestamp(),
        }));

    Ok(())
}

fn carts_response(registry: &CartRegistry) -> CartsResponse {
    CartsResponse {
        carts: registry.all_carts_with_validation(),
        total_items: registry.total_items(None),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/carts/:session_id/items
/// Add one unit of a product to its category cart
pub async fn add_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartsResponse>, AppError> {
    let mut registry = load_registry(&state, &session_id).await?;

    if let AddCheck::VendorConflict { vendor_name } =
        registry.can_add_item(&req.vendor_id, &req.category_id)
    {
        return Err(AppError::ConflictError(format!(
            "Your {} cart already has items from {}. Clear it to order from another kitchen.",
            req.category_name, vendor_name
        )));
    }

    let item = NewCartItem {
        product_id: req.product_id,
        name: req.name,
        price: req.price,
        image_url: req.image_url,
        category_id: req.category_id.clone(),
        vendor_id: req.vendor_id,
        vendor_name: req.vendor_name,
    };

    if !registry.add_to_cart(item, &req.category_name) {
        return Err(AppError::BadRequest(
            "Item has no category binding".to_string(),
        ));
    }

    persist_registry(&state, &session_id, &registry, &req.category_id).await?;
    Ok(Json(carts_response(&registry)))
}

/// DELETE /v1/carts/:session_id/items
/// Remove a line item; empty carts are pruned with it
pub async fn remove_item(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<RemoveItemRequest>,
) -> Result<Json<CartsResponse>, AppError> {
    let mut registry = load_registry(&state, &session_id).await?;

    registry.remove_from_cart(&req.category_id, &req.product_id);

    persist_registry(&state, &session_id, &registry, &req.category_id).await?;
    Ok(Json(carts_response(&registry)))
}

/// PUT /v1/carts/:session_id/items/quantity
/// Set a line's quantity to an absolute value
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartsResponse>, AppError> {
    let mut registry = load_registry(&state, &session_id).await?;

    registry.update_quantity(&req.category_id, &req.product_id, req.quantity);

    persist_registry(&state, &session_id, &registry, &req.category_id).await?;
    Ok(Json(carts_response(&registry)))
}

/// GET /v1/carts/:session_id
/// All category carts with minimum-order validation
pub async fn get_carts(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartsResponse>, AppError> {
    let registry = load_registry(&state, &session_id).await?;
    Ok(Json(carts_response(&registry)))
}

/// GET /v1/carts/:session_id/categories/:category_id
/// One category cart with validation
pub async fn get_cart(
    State(state): State<AppState>,
    Path((session_id, category_id)): Path<(String, String)>,
) -> Result<Json<ValidatedCart>, AppError> {
    let registry = load_registry(&state, &session_id).await?;

    registry
        .cart_with_validation(&category_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("No cart for category {}", category_id)))
}

/// DELETE /v1/carts/:session_id/categories/:category_id
/// Drop one category cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Path((session_id, category_id)): Path<(String, String)>,
) -> Result<Json<CartsResponse>, AppError> {
    let mut registry = load_registry(&state, &session_id).await?;

    registry.clear_cart(&category_id);

    persist_registry(&state, &session_id, &registry, &category_id).await?;
    Ok(Json(carts_response(&registry)))
}

/// DELETE /v1/carts/:session_id
/// Full session reset
pub async fn clear_all_carts(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartsResponse>, AppError> {
    let mut registry = load_registry(&state, &session_id).await?;

    registry.clear_all_carts();

    state
        .cart_store
        .clear(&session_id)
        .await
        .map_err(store_error)?;

    let _ = state
        .events_tx
        .send(StorefrontEvent::CartUpdated(CartUpdatedEvent {
            session_id: session_id.clone(),
            category_id: String::new(),
            total_items: 0,
            timestamp: Utc::now().timestamp(),
        }));

    Ok(Json(carts_response(&registry)))
}
