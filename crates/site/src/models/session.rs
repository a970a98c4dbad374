//! Session-related types.
//!
//! The visitor's session is the sole durability mechanism for the cart,
//! engagement metrics, theme preference, and popup-shown flags. Best-effort
//! state: a lost session means an empty cart, nothing more.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use wayfarer_core::{Currency, Price, ProductKind};

/// One line in the visitor's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog product id.
    pub id: String,
    /// Product name at the time of adding.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    pub image: String,
    /// Line quantity, always at least 1.
    pub quantity: u32,
    /// How the product is fulfilled; decides which cart controls render.
    pub kind: ProductKind,
    /// Download URL for digital products.
    pub download_url: Option<String>,
}

/// The session-stored cart.
///
/// Count and total are derived on demand, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add an item, merging by product id.
    ///
    /// Adding a product already in the cart increases that line's quantity
    /// instead of appending a duplicate line.
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Set a line's quantity.
    ///
    /// Quantities below 1 are rejected silently; unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Remove a line by product id.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|line| line.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Cart total in decimal arithmetic.
    #[must_use]
    pub fn total(&self) -> Price {
        let amount: Decimal = self
            .items
            .iter()
            .map(|line| line.price.amount() * Decimal::from(line.quantity))
            .sum();
        Price::new(amount, Currency::USD)
    }

    /// Whether the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every line is an affiliate link.
    ///
    /// Affiliate-only carts cannot check out; there is nothing to fulfill.
    #[must_use]
    pub fn all_affiliate(&self) -> bool {
        !self.items.is_empty()
            && self
                .items
                .iter()
                .all(|line| line.kind == ProductKind::Affiliate)
    }

    /// Whether any line needs shipping.
    #[must_use]
    pub fn has_physical(&self) -> bool {
        self.items.iter().any(|line| line.kind == ProductKind::Physical)
    }

    /// Item count for one fulfillment kind.
    #[must_use]
    pub fn count_of_kind(&self, kind: ProductKind) -> u32 {
        self.items
            .iter()
            .filter(|line| line.kind == kind)
            .map(|line| line.quantity)
            .sum()
    }
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for the cart.
    pub const CART: &str = "cart";

    /// Key for engagement metrics.
    pub const ENGAGEMENT: &str = "engagement";

    /// Key for the newsletter-popup-shown flag.
    pub const NEWSLETTER_POPUP_SHOWN: &str = "newsletter_popup_shown";

    /// Key for the ebook-popup-shown flag.
    pub const EBOOK_POPUP_SHOWN: &str = "ebook_popup_shown";

    /// Key for the theme preference (`light` or `dark`).
    pub const THEME: &str = "theme";
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64, kind: ProductKind) -> CartItem {
        CartItem {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: Price::from_cents(cents, Currency::USD),
            image: "/static/images/placeholder.svg".to_string(),
            quantity: 1,
            kind,
            download_url: None,
        }
    }

    #[test]
    fn test_add_merges_by_id() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));
        cart.add(item("prod-1", 1999, ProductKind::Digital));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_keeps_distinct_products_separate() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));
        cart.add(item("prod-2", 950, ProductKind::Physical));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));
        cart.update_quantity("prod-1", 3);
        cart.update_quantity("prod-1", 0);

        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_ignored() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));
        cart.update_quantity("prod-9", 5);

        assert_eq!(cart.items[0].quantity, 1);
    }

    #[test]
    fn test_remove_filters_by_id() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));
        cart.add(item("prod-2", 950, ProductKind::Physical));
        cart.remove("prod-1");

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id, "prod-2");
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_total_uses_decimal_arithmetic() {
        let mut cart = Cart::default();
        let mut line = item("prod-1", 1999, ProductKind::Digital);
        line.quantity = 3;
        cart.add(line);
        cart.add(item("prod-2", 950, ProductKind::Physical));

        // 3 * 19.99 + 9.50
        assert_eq!(cart.total().display(), "$69.47");
    }

    #[test]
    fn test_all_affiliate_detection() {
        let mut cart = Cart::default();
        assert!(!cart.all_affiliate());

        cart.add(item("prod-1", 1999, ProductKind::Affiliate));
        assert!(cart.all_affiliate());

        cart.add(item("prod-2", 950, ProductKind::Digital));
        assert!(!cart.all_affiliate());
    }

    #[test]
    fn test_kind_counts_and_shipping_flag() {
        let mut cart = Cart::default();
        let mut digital = item("prod-1", 1999, ProductKind::Digital);
        digital.quantity = 2;
        cart.add(digital);
        cart.add(item("prod-2", 950, ProductKind::Affiliate));

        assert_eq!(cart.count_of_kind(ProductKind::Digital), 2);
        assert_eq!(cart.count_of_kind(ProductKind::Affiliate), 1);
        assert_eq!(cart.count_of_kind(ProductKind::Physical), 0);
        assert!(!cart.has_physical());

        cart.add(item("prod-3", 4999, ProductKind::Physical));
        assert!(cart.has_physical());
    }

    #[test]
    fn test_cart_serde_roundtrip() {
        let mut cart = Cart::default();
        cart.add(item("prod-1", 1999, ProductKind::Digital));

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.items.len(), 1);
        assert_eq!(back.items[0].id, "prod-1");
        assert_eq!(back.total().display(), "$19.99");
    }
}
