//! Configuration constants and settings for the storefront.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{OrderError, Result};

/// Fixed surcharge for delivery orders.
pub const DELIVERY_FEE: Decimal = dec!(8.00);

/// First hour (inclusive) in which the store takes orders.
pub const OPEN_HOUR: u32 = 19;

/// Hour (exclusive) at which the store closes.
pub const CLOSE_HOUR: u32 = 23;

/// Spacing of the scheduling grid, in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// How often the open/closed status is re-evaluated.
pub const POLL_INTERVAL_SECS: u64 = 60;

/// WhatsApp number orders are sent to.
pub const WHATSAPP_NUMBER: &str = "5511987654321";

/// Locality that delivery addresses must belong to.
pub const ALLOWED_CITY: &str = "votuporanga";

/// Base URL of the postal-code lookup service.
pub const LOOKUP_BASE_URL: &str = "https://viacep.com.br/ws";

/// Currency prefix used when rendering prices.
pub const CURRENCY_PREFIX: &str = "R$";

/// Store settings. Every field falls back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Delivery surcharge for "entrega" orders.
    pub delivery_fee: Decimal,
    /// Opening hour (inclusive).
    pub open_hour: u32,
    /// Closing hour (exclusive).
    pub close_hour: u32,
    /// Scheduling grid step in minutes.
    pub slot_minutes: u32,
    /// Open/closed polling interval in seconds.
    pub poll_interval_secs: u64,
    /// Destination WhatsApp number (digits only).
    pub whatsapp_number: String,
    /// Case-insensitive locality substring accepted for delivery.
    pub allowed_city: String,
    /// Postal-code service base URL.
    pub lookup_base_url: String,
    /// Optional JSON catalog replacing the built-in menu.
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            delivery_fee: DELIVERY_FEE,
            open_hour: OPEN_HOUR,
            close_hour: CLOSE_HOUR,
            slot_minutes: SLOT_MINUTES,
            poll_interval_secs: POLL_INTERVAL_SECS,
            whatsapp_number: WHATSAPP_NUMBER.to_string(),
            allowed_city: ALLOWED_CITY.to_string(),
            lookup_base_url: LOOKUP_BASE_URL.to_string(),
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|source| OrderError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.check_hours()?;
        Ok(config)
    }

    /// Opening and closing hours must be on the clock face (0 to 24).
    pub fn check_hours(&self) -> Result<()> {
        for hour in [self.open_hour, self.close_hour] {
            if hour > 24 {
                return Err(OrderError::InvalidTime {
                    value: hour.to_string(),
                    expected: "an hour between 0 and 24".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Polling interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Human-readable opening hours, e.g. "19:00 às 23:00".
    pub fn opening_hours(&self) -> String {
        format!("{:02}:00 às {:02}:00", self.open_hour, self.close_hour)
    }
}

/// Format a price the way the menu and messages show it: `R$ 32.00`.
pub fn format_price(amount: Decimal) -> String {
    format!("{} {:.2}", CURRENCY_PREFIX, amount.round_dp(2))
}
