use crate::models::{
    AddCheck, CartLineItem, CartSnapshot, CategoryCart, NewCartItem, ValidatedCart,
    DEFAULT_MIN_ORDER_AMOUNT,
};
use std::collections::HashMap;

/// Per-session registry of category carts.
///
/// Holds one independent cart per product category and enforces that all
/// items within a category come from the same vendor. Every mutation keeps
/// two invariants: no cart is ever empty (the cart is pruned with its last
/// line), and no line ever has quantity zero (the line is removed instead).
///
/// The registry is a plain in-memory engine; callers persist `snapshot()`
/// through a [`crate::repository::CartStore`] after each mutation.
#[derive(Debug, Clone, Default)]
pub struct CartRegistry {
    carts: HashMap<String, CategoryCart>,
    min_settings: HashMap<String, i32>,
}

impl CartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from its persisted form. Empty carts in a stale
    /// snapshot are dropped on the way in, re-establishing the pruning
    /// invariant.
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        let carts = snapshot
            .carts
            .into_iter()
            .filter(|cart| !cart.is_empty())
            .map(|cart| (cart.category_id.clone(), cart))
            .collect();

        Self {
            carts,
            min_settings: snapshot.cart_min_settings,
        }
    }

    /// Persisted form of the registry. Carts are emitted in category-id
    /// order so identical registries produce identical snapshots.
    pub fn snapshot(&self) -> CartSnapshot {
        let mut carts: Vec<CategoryCart> = self.carts.values().cloned().collect();
        carts.sort_by(|a, b| a.category_id.cmp(&b.category_id));

        CartSnapshot {
            carts,
            cart_min_settings: self.min_settings.clone(),
        }
    }

    /// Pure pre-add check: may `vendor_id` sell into `category_id` right
    /// now? Never mutates; callers use it to warn before a conflicting add.
    pub fn can_add_item(&self, vendor_id: &str, category_id: &str) -> AddCheck {
        match self.carts.get(category_id) {
            Some(cart) if cart.vendor_id != vendor_id => AddCheck::VendorConflict {
                vendor_name: cart.vendor_name.clone(),
            },
            _ => AddCheck::Allowed,
        }
    }

    /// Add one unit of a product. Returns false, leaving the registry
    /// untouched, when the item carries an empty category id or another
    /// vendor already owns the category's cart. Re-adding an existing
    /// product increments its quantity.
    pub fn add_to_cart(&mut self, item: NewCartItem, category_name: &str) -> bool {
        if item.category_id.is_empty() {
            tracing::debug!("Rejected add for {}: empty category id", item.product_id);
            return false;
        }

        if !self.can_add_item(&item.vendor_id, &item.category_id).is_allowed() {
            tracing::debug!(
                "Rejected add for {}: vendor conflict in {}",
                item.product_id,
                item.category_id
            );
            return false;
        }

        let cart = self
            .carts
            .entry(item.category_id.clone())
            .or_insert_with(|| {
                CategoryCart::new(
                    item.category_id.clone(),
                    category_name.to_string(),
                    item.vendor_id.clone(),
                    item.vendor_name.clone(),
                )
            });

        match cart.items.get_mut(&item.product_id) {
            Some(line) => line.quantity += 1,
            None => {
                cart.items.insert(
                    item.product_id.clone(),
                    CartLineItem {
                        product_id: item.product_id,
                        name: item.name,
                        price: item.price,
                        quantity: 1,
                        image_url: item.image_url,
                        vendor_id: item.vendor_id,
                        vendor_name: item.vendor_name,
                    },
                );
            }
        }

        true
    }

    /// Remove a line item; prunes the category cart when it empties.
    /// No-op when the category or product is absent.
    pub fn remove_from_cart(&mut self, category_id: &str, product_id: &str) {
        if let Some(cart) = self.carts.get_mut(category_id) {
            cart.items.remove(product_id);
            if cart.is_empty() {
                self.carts.remove(category_id);
            }
        }
    }

    /// Set a line's quantity to an absolute value. A quantity of zero or
    /// less behaves exactly as [`Self::remove_from_cart`]. No-op when the
    /// category or product is absent.
    pub fn update_quantity(&mut self, category_id: &str, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(category_id, product_id);
            return;
        }

        if let Some(cart) = self.carts.get_mut(category_id) {
            if let Some(line) = cart.items.get_mut(product_id) {
                line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }
    }

    /// Drop one category's cart, e.g. after successful order placement.
    pub fn clear_cart(&mut self, category_id: &str) {
        self.carts.remove(category_id);
    }

    /// Drop every cart; used on full session reset.
    pub fn clear_all_carts(&mut self) {
        self.carts.clear();
    }

    pub fn cart(&self, category_id: &str) -> Option<&CategoryCart> {
        self.carts.get(category_id)
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Sum of quantities in one category, or across every category when
    /// `category_id` is `None`.
    pub fn total_items(&self, category_id: Option<&str>) -> u32 {
        match category_id {
            Some(id) => self.carts.get(id).map_or(0, CategoryCart::total_items),
            None => self.carts.values().map(CategoryCart::total_items).sum(),
        }
    }

    /// Sum of price x quantity for one category; 0 for an absent category.
    pub fn total_price(&self, category_id: &str) -> i32 {
        self.carts.get(category_id).map_or(0, CategoryCart::subtotal)
    }

    /// Effective minimum order amount for a category.
    pub fn min_order_amount(&self, category_id: &str) -> i32 {
        self.min_settings
            .get(category_id)
            .copied()
            .unwrap_or(DEFAULT_MIN_ORDER_AMOUNT)
    }

    /// Per-category minimum supplied by the admin collaborator.
    pub fn set_min_order_amount(&mut self, category_id: &str, amount: i32) {
        self.min_settings.insert(category_id.to_string(), amount);
    }

    /// One cart with its minimum-order validation, or `None` when absent.
    pub fn cart_with_validation(&self, category_id: &str) -> Option<ValidatedCart> {
        self.carts.get(category_id).map(|cart| self.validate(cart))
    }

    /// Every cart with validation, in category-id order.
    pub fn all_carts_with_validation(&self) -> Vec<ValidatedCart> {
        let mut validated: Vec<ValidatedCart> =
            self.carts.values().map(|cart| self.validate(cart)).collect();
        validated.sort_by(|a, b| a.cart.category_id.cmp(&b.cart.category_id));
        validated
    }

    fn validate(&self, cart: &CategoryCart) -> ValidatedCart {
        let subtotal = cart.subtotal();
        let min_order_amount = self.min_order_amount(&cart.category_id);

        ValidatedCart {
            cart: cart.clone(),
            subtotal,
            min_order_amount,
            meets_minimum: subtotal >= min_order_amount,
        }
    }
}
