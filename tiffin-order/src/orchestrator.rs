use crate::models::{CheckoutRequest, CustomerDetails, PlacedOrder, PlacedOrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tiffin_cart::CartRegistry;
use tiffin_core::geo::GeoPoint;
use tiffin_delivery::DeliveryZoneEvaluator;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("No cart exists for category {0}")]
    EmptyCart(String),

    #[error("Delivery not available {distance_km} km from the kitchen")]
    OutsideServiceArea { distance_km: f64 },

    #[error("Cart subtotal {subtotal} is below the minimum order of {minimum}")]
    BelowMinimumOrder { subtotal: i32, minimum: i32 },

    #[error("Order placement failed: {0}")]
    PlacementFailed(String),
}

/// External order-placement collaborator. A non-success response is a
/// transient failure: the caller keeps the cart and retries.
#[async_trait]
pub trait OrderPlacementAdapter: Send + Sync {
    async fn place_order(
        &self,
        request: &CheckoutRequest,
        customer: &CustomerDetails,
    ) -> Result<PlacedOrder, Box<dyn std::error::Error + Send + Sync>>;
}

/// Composes the cart registry with the delivery evaluator to produce the
/// final accept/reject decision and the immutable submission payload.
pub struct CheckoutOrchestrator {
    evaluator: DeliveryZoneEvaluator,
    placement: Arc<dyn OrderPlacementAdapter>,
}

impl CheckoutOrchestrator {
    pub fn new(evaluator: DeliveryZoneEvaluator, placement: Arc<dyn OrderPlacementAdapter>) -> Self {
        Self {
            evaluator,
            placement,
        }
    }

    pub fn evaluator(&self) -> &DeliveryZoneEvaluator {
        &self.evaluator
    }

    /// Freeze one category cart into a [`CheckoutRequest`].
    ///
    /// Checks run in order: the cart must exist, the coordinate must be
    /// serviceable, and the subtotal must meet the category minimum. The
    /// registry is not mutated here.
    pub fn prepare_checkout(
        &self,
        registry: &CartRegistry,
        category_id: &str,
        deliver_to: GeoPoint,
    ) -> Result<CheckoutRequest, CheckoutError> {
        let validated = registry
            .cart_with_validation(category_id)
            .ok_or_else(|| CheckoutError::EmptyCart(category_id.to_string()))?;

        let quote = self.evaluator.evaluate(deliver_to);
        if !quote.serviceable {
            return Err(CheckoutError::OutsideServiceArea {
                distance_km: quote.distance_km,
            });
        }

        if !validated.meets_minimum {
            return Err(CheckoutError::BelowMinimumOrder {
                subtotal: validated.subtotal,
                minimum: validated.min_order_amount,
            });
        }

        let cart = validated.cart;
        let mut items: Vec<_> = cart.items.into_values().collect();
        items.sort_by(|a, b| a.product_id.cmp(&b.product_id));

        Ok(CheckoutRequest {
            id: Uuid::new_v4(),
            category_id: cart.category_id,
            category_name: cart.category_name,
            vendor_id: cart.vendor_id,
            vendor_name: cart.vendor_name,
            items,
            subtotal: validated.subtotal,
            delivery_fee: quote.fee,
            total: validated.subtotal + quote.fee,
            deliver_to,
            distance_km: quote.distance_km,
            eta_minutes: quote.eta_minutes,
            created_at: Utc::now(),
        })
    }

    /// Hand a frozen request to the placement collaborator. Only on its
    /// success is the category cart cleared; on failure the cart is left
    /// untouched so the customer retries without re-adding items.
    pub async fn commit_checkout(
        &self,
        registry: &mut CartRegistry,
        request: &CheckoutRequest,
        customer: &CustomerDetails,
    ) -> Result<PlacedOrder, CheckoutError> {
        match self.placement.place_order(request, customer).await {
            Ok(placed) => {
                registry.clear_cart(&request.category_id);
                tracing::info!(
                    "Order {} placed for category {}, total {}",
                    placed.order_id,
                    request.category_id,
                    request.total
                );
                Ok(placed)
            }
            Err(e) => {
                tracing::warn!(
                    "Order placement failed for category {}, cart kept: {}",
                    request.category_id,
                    e
                );
                Err(CheckoutError::PlacementFailed(e.to_string()))
            }
        }
    }
}

pub struct MockOrderPlacementAdapter;

#[async_trait]
impl OrderPlacementAdapter for MockOrderPlacementAdapter {
    async fn place_order(
        &self,
        request: &CheckoutRequest,
        customer: &CustomerDetails,
    ) -> Result<PlacedOrder, Box<dyn std::error::Error + Send + Sync>> {
        // Trigger for testing the failure path
        if customer.name == "fail-placement" {
            return Err("Simulated order endpoint outage".into());
        }

        tracing::info!(
            "Mock placement accepted order for {} ({} items)",
            request.vendor_name,
            request.items.len()
        );

        Ok(PlacedOrder {
            order_id: Uuid::new_v4(),
            status: PlacedOrderStatus::Received,
        })
    }
}
