use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum order amount in currency units for categories with no configured
/// minimum.
pub const DEFAULT_MIN_ORDER_AMOUNT: i32 = 100;

/// A purchasable unit inside one category cart. Quantity is always >= 1;
/// a line that would drop to zero is removed instead of stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLineItem {
    pub product_id: String,
    pub name: String,
    pub price: i32,
    pub quantity: u32,
    pub image_url: Option<String>,
    pub vendor_id: String,
    pub vendor_name: String,
}

impl CartLineItem {
    /// Price x quantity for this line.
    pub fn line_total(&self) -> i32 {
        self.price * self.quantity as i32
    }
}

/// Add-to-cart input. The category and vendor bindings are mandatory fields:
/// an unbound item cannot be expressed at this boundary, so nothing ever
/// defaults to an empty binding downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartItem {
    pub product_id: String,
    pub name: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub category_id: String,
    pub vendor_id: String,
    pub vendor_name: String,
}

/// Outcome of the pure pre-add vendor check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCheck {
    Allowed,
    /// The category already carries a cart from a different vendor; the
    /// blocking vendor's display name is surfaced to the customer.
    VendorConflict { vendor_name: String },
}

impl AddCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AddCheck::Allowed)
    }
}

/// One category's sub-cart, exclusive to a single vendor. Items are keyed by
/// product id; product ids are unique within the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCart {
    pub category_id: String,
    pub category_name: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub items: HashMap<String, CartLineItem>,
}

impl CategoryCart {
    pub fn new(category_id: String, category_name: String, vendor_id: String, vendor_name: String) -> Self {
        Self {
            category_id,
            category_name,
            vendor_id,
            vendor_name,
            items: HashMap::new(),
        }
    }

    /// Sum of price x quantity across all lines.
    pub fn subtotal(&self) -> i32 {
        self.items.values().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u32 {
        self.items.values().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A category cart augmented with minimum-order validation for display.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedCart {
    pub cart: CategoryCart,
    pub subtotal: i32,
    pub min_order_amount: i32,
    pub meets_minimum: bool,
}

/// Persisted form of the whole registry. Round-trips exactly:
/// `CartRegistry::from_snapshot(r.snapshot())` reproduces `r`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartSnapshot {
    pub carts: Vec<CategoryCart>,
    pub cart_min_settings: HashMap<String, i32>,
}
