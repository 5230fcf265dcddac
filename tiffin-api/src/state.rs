use std::collections::HashMap;
use std::sync::Arc;
use tiffin_cart::CartStore;
use tiffin_delivery::DeliveryZoneEvaluator;
use tiffin_order::CheckoutOrchestrator;
use tiffin_shared::StorefrontEvent;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub cart_store: Arc<dyn CartStore>,
    pub orchestrator: Arc<CheckoutOrchestrator>,
    pub evaluator: DeliveryZoneEvaluator,
    /// Fan-out to notification collaborators (WebSocket bridge, messaging).
    pub events_tx: broadcast::Sender<StorefrontEvent>,
    /// Admin-configured per-category minimum order amounts.
    pub category_minimums: HashMap<String, i32>,
}
