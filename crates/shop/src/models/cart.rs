//! Shopping cart value object.
//!
//! The cart lives entirely in the visitor's session. Handlers load it, call
//! the methods here, and store it back; nothing in this module touches the
//! session or the database.

use serde::{Deserialize, Serialize};

use clover_core::{ItemId, Price};

/// One line in the cart.
///
/// There is no quantity field. Adding the same item again appends another
/// line, and each line contributes its unit price to the total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// The item this line refers to.
    pub id: ItemId,
    /// Display name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub price: Price,
}

/// A session-scoped shopping cart: an ordered list of lines.
///
/// Two states, empty and non-empty. `add_line` always moves to non-empty;
/// `clear` (and checkout, which is clear plus a confirmation page) always
/// moves back to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line unconditionally.
    pub fn add_line(&mut self, id: ItemId, name: impl Into<String>, price: Price) {
        self.lines.push(CartLine {
            id,
            name: name.into(),
            price,
        });
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line prices. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|line| &line.price).sum()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn widget_price() -> Price {
        Price::parse("9.99").unwrap()
    }

    #[test]
    fn test_new_cart_is_empty_with_zero_total() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_add_line_accumulates() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(42), "Widget", widget_price());
        assert!(!cart.is_empty());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), widget_price());
    }

    #[test]
    fn test_same_item_twice_makes_two_lines_and_doubles_total() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(42), "Widget", widget_price());
        cart.add_line(ItemId::new(42), "Widget", widget_price());

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Price::parse("19.98").unwrap());
    }

    #[test]
    fn test_total_sums_mixed_lines() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(1), "Widget", Price::parse("9.99").unwrap());
        cart.add_line(ItemId::new(2), "Gadget", Price::parse("0.01").unwrap());
        cart.add_line(ItemId::new(3), "Freebie", Price::ZERO);

        assert_eq!(cart.total(), Price::parse("10.00").unwrap());
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_clear_empties_regardless_of_contents() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(1), "Widget", widget_price());
        cart.add_line(ItemId::new(2), "Gadget", widget_price());

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_clear_on_empty_cart_is_a_no_op() {
        let mut cart = Cart::new();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_after_clear_starts_fresh() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(1), "Widget", widget_price());
        cart.clear();
        cart.add_line(ItemId::new(2), "Gadget", Price::parse("3.50").unwrap());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Price::parse("3.50").unwrap());
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(1), "First", widget_price());
        cart.add_line(ItemId::new(2), "Second", widget_price());

        let names: Vec<&str> = cart.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_serde_roundtrip_is_a_bare_array() {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new(42), "Widget", widget_price());

        let json = serde_json::to_string(&cart).unwrap();
        // Transparent: the session stores the cart as a plain list of lines
        assert!(json.starts_with('['));

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
