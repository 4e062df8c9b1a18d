//! A single in-memory storefront session.
//!
//! Data flows one way: catalog and selection feed the cart, the cart feeds
//! the order message. Everything is lost when the session is dropped.

use tracing::{debug, info};

use crate::address::{AddressLookup, DeliveryForm};
use crate::availability::{AvailabilityGate, StoreStatus};
use crate::cart::{Cart, SelectionState, Totals};
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::{OrderError, Result};
use crate::generator::{append_delivery_address, WhatsAppLink};
use crate::model::{Address, CatalogItem, DeliveryMode, LineItem};
use crate::parser::OrderRequest;
use crate::schedule::ScheduleFlow;

/// Result of pressing "add to cart".
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The store is open and the line was committed.
    Added(LineItem),
    /// The store is closed; the cart is untouched and scheduling opens instead.
    ScheduleRequired(ScheduleFlow),
}

/// Result of replaying an [`OrderRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayOutcome {
    Committed(Vec<LineItem>),
    ScheduleRequired(ScheduleFlow),
}

pub struct Storefront<C: Clock = SystemClock> {
    catalog: Catalog,
    config: StoreConfig,
    clock: C,
    gate: AvailabilityGate,
    selection: SelectionState,
    cart: Cart,
    delivery: DeliveryForm,
}

impl<C: Clock> Storefront<C> {
    pub fn new(catalog: Catalog, config: StoreConfig, clock: C) -> Self {
        let category = catalog
            .default_category()
            .map(|c| c.id.clone())
            .unwrap_or_default();

        Self {
            gate: AvailabilityGate::from_config(&config),
            selection: SelectionState::new(category),
            cart: Cart::new(config.delivery_fee),
            delivery: DeliveryForm::new(config.allowed_city.clone()),
            catalog,
            config,
            clock,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn delivery(&self) -> &DeliveryForm {
        &self.delivery
    }

    pub fn delivery_mut(&mut self) -> &mut DeliveryForm {
        &mut self.delivery
    }

    pub fn status(&self) -> StoreStatus {
        self.gate.status_at(self.clock.now())
    }

    pub fn status_banner(&self) -> String {
        self.gate.banner(self.status())
    }

    pub fn select_category(&mut self, category: &str) -> Result<()> {
        self.selection.select_category(&self.catalog, category)
    }

    /// Items of the selected category.
    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        self.catalog
            .items_in_category(&self.selection.category)
            .collect()
    }

    pub fn select_size(&mut self, item_id: &str, size: &str) -> Result<()> {
        let item = self.catalog.item(item_id)?;
        self.selection.select_size(item, size)
    }

    pub fn toggle_topping(&mut self, item_id: &str, topping: &str) -> Result<bool> {
        let item = self.catalog.item(item_id)?;
        self.selection.toggle_topping(item, topping)
    }

    pub fn toggle_addon(&mut self, item_id: &str, addon: &str) -> Result<bool> {
        let item = self.catalog.item(item_id)?;
        self.selection.toggle_addon(item, addon)
    }

    /// Commit the current selection for an item, or redirect to scheduling
    /// when the store is closed.
    pub fn add_to_cart(&mut self, item_id: &str) -> Result<AddOutcome> {
        let now = self.clock.now();
        let item = self.catalog.item(item_id)?;

        if self.gate.status_at(now) == StoreStatus::Closed {
            info!("Store closed, redirecting {} to scheduling", item_id);
            return Ok(AddOutcome::ScheduleRequired(ScheduleFlow::open(
                &self.config,
                now,
            )));
        }

        let timestamp_ms = now.and_utc().timestamp_millis();
        let line = self
            .cart
            .add_line_item(item, &mut self.selection, timestamp_ms)?;
        Ok(AddOutcome::Added(line))
    }

    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) {
        self.cart.update_quantity(line_id, quantity);
    }

    pub fn remove(&mut self, line_id: &str) -> Option<LineItem> {
        self.cart.remove(line_id)
    }

    pub fn set_delivery_mode(&mut self, mode: DeliveryMode) {
        debug!("Delivery mode set to {}", mode);
        self.cart.set_delivery_mode(mode);
    }

    pub fn totals(&self) -> Totals {
        self.cart.compute_totals()
    }

    /// Scheduling dialog as of now.
    pub fn open_schedule(&self) -> ScheduleFlow {
        ScheduleFlow::open(&self.config, self.clock.now())
    }

    /// Link for a scheduling request made today.
    pub fn submit_schedule(&self, flow: &ScheduleFlow) -> Result<WhatsAppLink> {
        flow.submit(self.clock.now().date(), &self.config)
    }

    /// Look up the delivery form's postal code.
    pub fn lookup_address(&mut self, service: &dyn AddressLookup) -> Result<Address> {
        self.delivery.lookup(service).cloned()
    }

    /// Order message, with the delivery address when delivering to a complete one.
    pub fn order_message(&self) -> Result<String> {
        let mut message = self.cart.render_order_message()?;
        let address = self.delivery.address();
        if self.cart.delivery_mode().is_delivery() && address.is_complete() {
            append_delivery_address(&mut message, address);
        }
        Ok(message)
    }

    /// WhatsApp link for the current cart. Blocked when the cart is empty.
    pub fn submit_order(&self) -> Result<WhatsAppLink> {
        let message = self.order_message()?;
        info!(
            "Submitting order with {} item(s), total {}",
            self.cart.item_count(),
            self.totals().total
        );
        Ok(WhatsAppLink::new(self.config.whatsapp_number.clone(), message))
    }

    /// Replay a recorded order through the menu as a customer would.
    ///
    /// Stops at the first item if the store is closed.
    pub fn replay(&mut self, request: &OrderRequest) -> Result<ReplayOutcome> {
        self.set_delivery_mode(request.mode);
        if let Some(postal_code) = &request.postal_code {
            self.delivery.set_postal_code(postal_code.clone());
        }
        if let Some(number) = &request.number {
            self.delivery.set_number(number.clone());
        }

        let mut committed = Vec::with_capacity(request.items.len());
        for entry in &request.items {
            let item = self.catalog.item(&entry.id)?;
            self.selection.select_category(&self.catalog, &item.category)?;

            if item.customizable {
                if let Some(size) = &entry.size {
                    self.selection.select_size(item, size)?;
                }
                for topping in &entry.toppings {
                    if !self.selection.is_topping_selected(topping) {
                        self.selection.toggle_topping(item, topping)?;
                    }
                }
            } else {
                for addon in &entry.addons {
                    if !self.selection.is_addon_selected(&item.id, addon) {
                        self.selection.toggle_addon(item, addon)?;
                    }
                }
            }

            match self.add_to_cart(&entry.id)? {
                AddOutcome::Added(line) => {
                    if entry.quantity != 1 {
                        self.cart.update_quantity(&line.id, entry.quantity);
                    }
                    // A zero quantity drops the line again.
                    if let Some(line) = self.cart.find(&line.id) {
                        committed.push(line.clone());
                    }
                }
                AddOutcome::ScheduleRequired(flow) => {
                    return Ok(ReplayOutcome::ScheduleRequired(flow));
                }
            }
        }

        if committed.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        Ok(ReplayOutcome::Committed(committed))
    }
}
