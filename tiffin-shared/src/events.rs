use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CartUpdatedEvent {
    pub session_id: String,
    pub category_id: String,
    pub total_items: u32,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct OrderPlacedEvent {
    pub order_id: Uuid,
    pub session_id: String,
    pub category_id: String,
    pub total: i32,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct FeeQuotedEvent {
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub fee: i32,
    pub serviceable: bool,
    pub timestamp: i64,
}

/// Storefront notification fan-out payload. Consumers (WebSocket bridge,
/// e-mail/WhatsApp senders) subscribe to a broadcast channel of these.
#[derive(Debug, serde::Serialize, Clone)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorefrontEvent {
    CartUpdated(CartUpdatedEvent),
    OrderPlaced(OrderPlacedEvent),
    FeeQuoted(FeeQuotedEvent),
}
