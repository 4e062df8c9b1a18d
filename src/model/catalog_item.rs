//! Menu entries as the customer sees them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A menu section, e.g. `artesanais` / "Hambúrgueres Artesanais de Costela".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Key used to filter items.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Category {
    /// Create a new category.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Optional paid modifier on a fixed-price item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Addon {
    /// Create a new add-on.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Size choice of a customizable item; the size price replaces the base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeOption {
    pub size: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Optional paid modifier on a customizable item, priced independently of size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topping {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Sizes and toppings offered by a customizable item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOptions {
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(default)]
    pub toppings: Vec<Topping>,
}

/// A purchasable menu entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description shown under the name.
    #[serde(default)]
    pub description: String,
    /// Base price (unused for customizable items).
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Category key.
    pub category: String,
    /// Whether the item is built from a size plus toppings.
    #[serde(default)]
    pub customizable: bool,
    /// Sizes and toppings (customizable items only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ItemOptions>,
    /// Add-ons (fixed-price items only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<Addon>,
}

impl CatalogItem {
    /// Create a fixed-price item.
    pub fn fixed(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
            customizable: false,
            options: None,
            addons: Vec::new(),
        }
    }

    /// Attach add-ons to a fixed-price item.
    pub fn with_addons(mut self, addons: Vec<Addon>) -> Self {
        self.addons = addons;
        self
    }

    /// Turn the item into a customizable one with the given options.
    pub fn with_options(mut self, options: ItemOptions) -> Self {
        self.customizable = true;
        self.options = Some(options);
        self
    }

    /// Sizes offered, empty for fixed-price items.
    pub fn sizes(&self) -> &[SizeOption] {
        self.options.as_ref().map_or(&[], |o| o.sizes.as_slice())
    }

    /// Toppings offered, empty for fixed-price items.
    pub fn toppings(&self) -> &[Topping] {
        self.options.as_ref().map_or(&[], |o| o.toppings.as_slice())
    }

    pub fn find_size(&self, size: &str) -> Option<&SizeOption> {
        self.sizes().iter().find(|s| s.size == size)
    }

    pub fn find_topping(&self, name: &str) -> Option<&Topping> {
        self.toppings().iter().find(|t| t.name == name)
    }

    pub fn find_addon(&self, name: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.name == name)
    }

    /// Price shown on the menu card: the cheapest size for customizable items.
    pub fn display_price(&self) -> Decimal {
        if self.customizable {
            self.sizes()
                .iter()
                .map(|s| s.price)
                .min()
                .unwrap_or(self.price)
        } else {
            self.price
        }
    }
}
