use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tiffin_cart::CartLineItem;
use tiffin_core::geo::GeoPoint;
use tiffin_shared::pii::Masked;
use uuid::Uuid;

/// Customer identity attached to an order submission. Phone and e-mail are
/// masked in Debug output; the wire format carries the real values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: Masked<String>,
    pub address: String,
    pub email: Option<Masked<String>>,
}

/// Initial status reported by the order-placement collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacedOrderStatus {
    Received,
    Confirmed,
    Rejected,
}

/// Acknowledgement from the order-placement collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: Uuid,
    pub status: PlacedOrderStatus,
}

/// The frozen, submittable snapshot of one category cart plus its computed
/// delivery fee. Created once when the customer confirms checkout; never
/// mutated afterwards - a new checkout event produces a new request.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub id: Uuid,
    pub category_id: String,
    pub category_name: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub items: Vec<CartLineItem>,
    pub subtotal: i32,
    pub delivery_fee: i32,
    /// subtotal + delivery_fee.
    pub total: i32,
    /// The coordinate the fee was computed for.
    pub deliver_to: GeoPoint,
    pub distance_km: f64,
    pub eta_minutes: u32,
    pub created_at: DateTime<Utc>,
}
