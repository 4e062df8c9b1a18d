//! mana-order-rs - Menu, cart and WhatsApp order builder for Maná Lanches.
//!
//! The library models the storefront session: a read-only catalog, the
//! customer's in-progress selection, a cart with delivery-aware totals, the
//! opening-hours gate with its scheduling fallback, and the WhatsApp message
//! the order is handed off as.
//!
//! # Example
//!
//! ```
//! use mana_order_rs::{Catalog, FixedClock, StoreConfig, Storefront, AddOutcome};
//! use chrono::NaiveDate;
//!
//! let evening = NaiveDate::from_ymd_opt(2024, 3, 9)
//!     .unwrap()
//!     .and_hms_opt(20, 0, 0)
//!     .unwrap();
//! let mut shop = Storefront::new(Catalog::builtin(), StoreConfig::default(), FixedClock(evening));
//!
//! shop.toggle_addon("h1", "Bacon").unwrap();
//! assert!(matches!(shop.add_to_cart("h1").unwrap(), AddOutcome::Added(_)));
//!
//! let link = shop.submit_order().unwrap();
//! assert!(link.url().starts_with("https://wa.me/"));
//! ```

pub mod address;
pub mod availability;
pub mod cart;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod schedule;
pub mod session;
pub mod validation;

// Re-exports for convenience
pub use address::{AddressLookup, DeliveryForm, LookupResponse, ViaCepClient};
pub use availability::{AvailabilityGate, OpenStatusWatcher, StoreStatus};
pub use cart::{Cart, SelectionState, Totals};
pub use catalog::Catalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{format_price, StoreConfig};
pub use error::{ErrorCode, OrderError, Result};
pub use generator::{render_order_message, WhatsAppLink};
pub use model::{Address, CatalogItem, Category, DeliveryMode, LineItem};
pub use parser::{load_catalog, load_order_request, OrderRequest};
pub use schedule::{ScheduleFlow, TimeSlot};
pub use session::{AddOutcome, ReplayOutcome, Storefront};
pub use validation::{validate_catalog, ValidationResult};

/// Load the catalog named by the configuration, or the built-in menu, and
/// reject it if it fails validation.
pub fn load_configured_catalog(config: &StoreConfig) -> Result<Catalog> {
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path)?,
        None => Catalog::builtin(),
    };

    let validation = validation::ensure_valid(&catalog)?;
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }

    Ok(catalog)
}
