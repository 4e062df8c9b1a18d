//! Delivery address captured by the delivery form.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code (CEP) as typed by the customer.
    pub postal_code: String,
    /// Filled by lookup.
    pub street: String,
    /// Filled by lookup.
    pub neighborhood: String,
    /// Filled by lookup.
    pub city: String,
    /// Free text, never looked up.
    pub number: String,
}

impl Address {
    /// Street, neighborhood, city and number are all present.
    pub fn is_complete(&self) -> bool {
        [&self.street, &self.neighborhood, &self.city, &self.number]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// One-line form used in order messages.
    pub fn summary(&self) -> String {
        format!(
            "{}, {} - {}, {}",
            self.street.trim(),
            self.number.trim(),
            self.neighborhood.trim(),
            self.city.trim()
        )
    }
}
