//! In-progress choices made on the menu before an item is committed.
//!
//! Selections live beside the catalog, keyed by item id, so catalog items stay
//! immutable and shared.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::{OrderError, Result};
use crate::model::CatalogItem;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Category filter currently shown.
    pub category: String,
    /// Size chosen for the customizable item.
    pub size: Option<String>,
    /// Toppings chosen for the customizable item, in the order they were picked.
    pub toppings: Vec<String>,
    /// Add-ons chosen per fixed-price item.
    pub addons: HashMap<String, Vec<String>>,
}

impl SelectionState {
    /// Start with the given category shown.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    /// Switch the category filter.
    ///
    /// Size and topping choices are kept; they are only cleared by committing
    /// the customizable item.
    pub fn select_category(&mut self, catalog: &Catalog, category: &str) -> Result<()> {
        if catalog.find_category(category).is_none() {
            return Err(OrderError::UnknownCategory {
                category: category.to_string(),
            });
        }
        self.category = category.to_string();
        Ok(())
    }

    pub fn select_size(&mut self, item: &CatalogItem, size: &str) -> Result<()> {
        if item.find_size(size).is_none() {
            return Err(OrderError::UnknownSize {
                item_id: item.id.clone(),
                size: size.to_string(),
            });
        }
        self.size = Some(size.to_string());
        Ok(())
    }

    /// Flip a topping. Returns whether it is selected afterwards.
    pub fn toggle_topping(&mut self, item: &CatalogItem, topping: &str) -> Result<bool> {
        if item.find_topping(topping).is_none() {
            return Err(OrderError::UnknownTopping {
                item_id: item.id.clone(),
                topping: topping.to_string(),
            });
        }
        Ok(toggle(&mut self.toppings, topping))
    }

    /// Flip an add-on for one item. Returns whether it is selected afterwards.
    pub fn toggle_addon(&mut self, item: &CatalogItem, addon: &str) -> Result<bool> {
        if item.find_addon(addon).is_none() {
            return Err(OrderError::UnknownAddon {
                item_id: item.id.clone(),
                addon: addon.to_string(),
            });
        }
        let chosen = self.addons.entry(item.id.clone()).or_default();
        Ok(toggle(chosen, addon))
    }

    pub fn is_topping_selected(&self, topping: &str) -> bool {
        self.toppings.iter().any(|t| t == topping)
    }

    pub fn is_addon_selected(&self, item_id: &str, addon: &str) -> bool {
        self.addons_for(item_id).iter().any(|a| a == addon)
    }

    /// Add-ons chosen for an item, empty if none.
    pub fn addons_for(&self, item_id: &str) -> &[String] {
        self.addons.get(item_id).map_or(&[], |v| v.as_slice())
    }

    /// Forget the add-ons of one item, leaving other items untouched.
    pub fn clear_addons(&mut self, item_id: &str) {
        self.addons.remove(item_id);
    }

    /// Forget the size and toppings of the customizable item.
    pub fn clear_customization(&mut self) {
        self.size = None;
        self.toppings.clear();
    }
}

fn toggle(list: &mut Vec<String>, name: &str) -> bool {
    if let Some(pos) = list.iter().position(|n| n == name) {
        list.remove(pos);
        false
    } else {
        list.push(name.to_string());
        true
    }
}
