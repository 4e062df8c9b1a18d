//! Cart engine: committed line items, quantities and totals.

mod pricing;
mod selection;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::generator;
use crate::model::{CatalogItem, DeliveryMode, LineItem};

pub use pricing::{price_customizable, price_with_addons, PricedSelection};
pub use selection::SelectionState;

/// Subtotal, delivery fee and total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Committed purchases for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
    delivery_mode: DeliveryMode,
    /// Surcharge applied in delivery mode.
    #[serde(with = "rust_decimal::serde::float")]
    delivery_fee: Decimal,
}

impl Cart {
    /// Create an empty pickup cart with the given delivery surcharge.
    pub fn new(delivery_fee: Decimal) -> Self {
        Self {
            items: Vec::new(),
            delivery_mode: DeliveryMode::default(),
            delivery_fee,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units, as shown on the cart badge.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) {
        self.delivery_mode = mode;
    }

    pub fn find(&self, line_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == line_id)
    }

    /// Commit the current selection for `item` as a new line item.
    ///
    /// Customizable items need a size; on success the global size and topping
    /// choices are cleared. Fixed-price items clear only their own add-on
    /// choices. On error nothing changes.
    pub fn add_line_item(
        &mut self,
        item: &CatalogItem,
        selection: &mut SelectionState,
        timestamp_ms: i64,
    ) -> Result<LineItem> {
        let priced = if item.customizable {
            price_customizable(item, selection.size.as_deref(), &selection.toppings)?
        } else {
            price_with_addons(item, selection.addons_for(&item.id))
        };

        let id = if item.customizable {
            // Size is present, price_customizable checked it.
            let size = selection.size.as_deref().unwrap_or_default();
            self.unique_id(&format!("{}-{}-{}", item.id, size, timestamp_ms))
        } else {
            self.unique_id(&format!("{}-{}", item.id, timestamp_ms))
        };

        let line = LineItem {
            id,
            item_id: item.id.clone(),
            name: priced.name,
            price: priced.price,
            quantity: 1,
            extras: priced.extras,
            addons: priced.addons,
        };

        if item.customizable {
            selection.clear_customization();
        } else {
            selection.clear_addons(&item.id);
        }

        info!("Added {} ({}) at {}", line.name, line.id, line.price);
        self.items.push(line.clone());
        Ok(line)
    }

    /// Set a line's quantity; anything below 1 removes the line.
    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) {
        if quantity < 1 {
            self.remove(line_id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|item| item.id == line_id) {
            debug!("Quantity of {} set to {}", line_id, quantity);
            line.quantity = quantity;
        }
    }

    /// Remove a line. Returns it if it was present.
    pub fn remove(&mut self, line_id: &str) -> Option<LineItem> {
        let pos = self.items.iter().position(|item| item.id == line_id)?;
        let removed = self.items.remove(pos);
        debug!("Removed {} from cart", removed.id);
        Some(removed)
    }

    /// Empty the cart, keeping the delivery mode.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Subtotal of all lines plus the fee when delivering.
    pub fn compute_totals(&self) -> Totals {
        let subtotal: Decimal = self.items.iter().map(LineItem::line_total).sum();
        let delivery_fee = if self.delivery_mode.is_delivery() {
            self.delivery_fee
        } else {
            Decimal::ZERO
        };

        Totals {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }

    /// Text of the WhatsApp order message. Fails with `EmptyCart` when empty.
    pub fn render_order_message(&self) -> Result<String> {
        generator::render_order_message(self)
    }

    fn unique_id(&self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 1;
        while self.find(&candidate).is_some() {
            suffix += 1;
            candidate = format!("{}-{}", base, suffix);
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::OrderError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn line(id: &str, price: Decimal, quantity: u32) -> LineItem {
        LineItem {
            id: id.to_string(),
            item_id: id.to_string(),
            name: id.to_string(),
            price,
            quantity,
            extras: Vec::new(),
            addons: Vec::new(),
        }
    }

    fn scenario_cart() -> Cart {
        let mut cart = Cart::new(dec!(8));
        cart.items.push(line("a", dec!(32.00), 2));
        cart.items.push(line("b", dec!(18.00), 1));
        cart
    }

    #[test]
    fn test_totals_pickup() {
        let totals = scenario_cart().compute_totals();
        assert_eq!(totals.subtotal, dec!(82.00));
        assert_eq!(totals.delivery_fee, dec!(0));
        assert_eq!(totals.total, dec!(82.00));
    }

    #[test]
    fn test_totals_delivery() {
        let mut cart = scenario_cart();
        cart.set_delivery_mode(DeliveryMode::Entrega);
        let totals = cart.compute_totals();
        assert_eq!(totals.subtotal, dec!(82.00));
        assert_eq!(totals.delivery_fee, dec!(8.00));
        assert_eq!(totals.total, dec!(90.00));
    }

    #[test]
    fn test_subtotal_ignores_order() {
        let cart = scenario_cart();
        let mut reversed = cart.clone();
        reversed.items.reverse();
        assert_eq!(cart.compute_totals(), reversed.compute_totals());
    }

    #[test]
    fn test_empty_cart_totals() {
        let mut cart = Cart::new(dec!(8));
        assert_eq!(cart.compute_totals().total, dec!(0));
        cart.set_delivery_mode(DeliveryMode::Entrega);
        assert_eq!(cart.compute_totals().total, dec!(8));
    }

    #[test]
    fn test_update_quantity_zero_is_remove() {
        let mut updated = scenario_cart();
        let mut removed = scenario_cart();

        updated.update_quantity("a", 0);
        removed.remove("a");

        assert_eq!(updated, removed);
        assert!(updated.find("a").is_none());
    }

    #[test]
    fn test_update_quantity_in_place() {
        let mut cart = scenario_cart();
        cart.update_quantity("b", 3);
        assert_eq!(cart.find("b").map(|l| l.quantity), Some(3));
        assert_eq!(cart.items()[1].id, "b");
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut cart = scenario_cart();
        cart.update_quantity("zzz", 4);
        assert!(cart.remove("zzz").is_none());
        assert_eq!(cart, scenario_cart());
    }

    #[test]
    fn test_add_fixed_item_clears_only_its_addons() {
        let catalog = Catalog::builtin();
        let h1 = catalog.item("h1").unwrap();
        let c1 = catalog.item("c1").unwrap();
        let mut selection = SelectionState::new("artesanais");
        selection.toggle_addon(h1, "Bacon").unwrap();
        selection.toggle_addon(h1, "Ovo").unwrap();
        selection.toggle_addon(c1, "Salsicha Extra").unwrap();

        let mut cart = Cart::new(dec!(8));
        let line = cart.add_line_item(h1, &mut selection, 1_000).unwrap();

        assert_eq!(line.id, "h1-1000");
        assert_eq!(line.price, dec!(38));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.addon_names(), vec!["Bacon", "Ovo"]);
        assert!(selection.addons_for("h1").is_empty());
        assert_eq!(selection.addons_for("c1"), ["Salsicha Extra".to_string()]);
    }

    #[test]
    fn test_add_customizable_clears_size_and_toppings() {
        let catalog = Catalog::builtin();
        let acai = catalog.item("acai-custom").unwrap();
        let h1 = catalog.item("h1").unwrap();
        let mut selection = SelectionState::new("acai-custom");
        selection.select_size(acai, "500ml").unwrap();
        selection.toggle_topping(acai, "Granola").unwrap();
        selection.toggle_topping(acai, "Nutella").unwrap();
        selection.toggle_addon(h1, "Bacon").unwrap();

        let mut cart = Cart::new(dec!(8));
        let line = cart.add_line_item(acai, &mut selection, 42).unwrap();

        assert_eq!(line.id, "acai-custom-500ml-42");
        assert_eq!(line.name, "Monte Seu Açaí 500ml");
        assert_eq!(line.price, dec!(24.00));
        assert_eq!(line.extras, vec!["Granola".to_string(), "Nutella".to_string()]);
        assert_eq!(selection.size, None);
        assert!(selection.toppings.is_empty());
        assert!(selection.is_addon_selected("h1", "Bacon"));
    }

    #[test]
    fn test_add_customizable_without_size_changes_nothing() {
        let catalog = Catalog::builtin();
        let acai = catalog.item("acai-custom").unwrap();
        let mut selection = SelectionState::new("acai-custom");
        selection.toggle_topping(acai, "Kiwi").unwrap();
        let before = selection.clone();

        let mut cart = Cart::new(dec!(8));
        let err = cart.add_line_item(acai, &mut selection, 7).unwrap_err();

        assert!(matches!(err, OrderError::SizeRequired { .. }));
        assert!(cart.is_empty());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_ids_stay_unique_within_same_millisecond() {
        let catalog = Catalog::builtin();
        let m1 = catalog.item("m1").unwrap();
        let mut selection = SelectionState::new("mistos");
        let mut cart = Cart::new(dec!(8));

        let first = cart.add_line_item(m1, &mut selection, 5).unwrap();
        let second = cart.add_line_item(m1, &mut selection, 5).unwrap();
        let third = cart.add_line_item(m1, &mut selection, 5).unwrap();

        assert_eq!(first.id, "m1-5");
        assert_eq!(second.id, "m1-5-2");
        assert_eq!(third.id, "m1-5-3");
    }

    #[test]
    fn test_price_fixed_at_creation() {
        let mut catalog = Catalog::builtin();
        let mut selection = SelectionState::new("bauru");
        let mut cart = Cart::new(dec!(8));
        let b1 = catalog.item("b1").unwrap().clone();
        cart.add_line_item(&b1, &mut selection, 1).unwrap();

        for item in catalog.items.iter_mut() {
            item.price += dec!(100);
        }
        assert_eq!(cart.items()[0].price, dec!(22));
    }
}
