//! The read-only menu.

mod menu;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, Result};
use crate::model::{CatalogItem, Category};

pub use menu::DEFAULT_CATEGORY;

/// Categories and items, loaded once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// The compiled-in Maná Lanches menu.
    pub fn builtin() -> Self {
        menu::builtin_catalog()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Like [`Catalog::find_item`], failing with `ItemNotFound`.
    pub fn item(&self, item_id: &str) -> Result<&CatalogItem> {
        self.find_item(item_id)
            .ok_or_else(|| OrderError::ItemNotFound {
                item_id: item_id.to_string(),
            })
    }

    pub fn find_category(&self, category: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category)
    }

    /// Items of one category, in menu order.
    pub fn items_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// The category shown first: the default one if present, else the first declared.
    pub fn default_category(&self) -> Option<&Category> {
        self.find_category(DEFAULT_CATEGORY)
            .or_else(|| self.categories.first())
    }
}
