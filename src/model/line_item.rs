//! Cart entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Addon;

/// One committed purchase with its price resolved at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique within the cart.
    pub id: String,
    /// Source catalog item.
    pub item_id: String,
    /// Display name, including the size for customizable items.
    pub name: String,
    /// Unit price: base or size price plus every chosen extra.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Always at least 1 while the line is in the cart.
    pub quantity: u32,
    /// Chosen toppings, in selection order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
    /// Chosen add-ons, in catalog order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<Addon>,
}

impl LineItem {
    /// Price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Names of the chosen add-ons.
    pub fn addon_names(&self) -> Vec<&str> {
        self.addons.iter().map(|a| a.name.as_str()).collect()
    }
}

/// How the customer gets the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Pickup at the store.
    #[default]
    Retirada,
    /// Delivery to an address, with a surcharge.
    Entrega,
}

impl DeliveryMode {
    pub fn is_delivery(&self) -> bool {
        matches!(self, DeliveryMode::Entrega)
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Retirada => write!(f, "retirada"),
            DeliveryMode::Entrega => write!(f, "entrega"),
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retirada" | "pickup" => Ok(DeliveryMode::Retirada),
            "entrega" | "delivery" => Ok(DeliveryMode::Entrega),
            other => Err(format!(
                "unknown delivery mode '{}': expected retirada or entrega",
                other
            )),
        }
    }
}
