//! JSON input files: catalogs and order requests.

mod catalog;
mod order;

pub use catalog::{load_catalog, parse_catalog_str};
pub use order::{load_order_request, OrderRequest, OrderRequestItem};
