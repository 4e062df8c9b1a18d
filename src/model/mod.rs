//! Data model types for the storefront.

mod address;
mod catalog_item;
mod line_item;

pub use address::Address;
pub use catalog_item::{Addon, CatalogItem, Category, ItemOptions, SizeOption, Topping};
pub use line_item::{DeliveryMode, LineItem};
