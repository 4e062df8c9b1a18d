//! Catalog files.
//!
//! ```json
//! {
//!   "categories": [{ "id": "mistos", "name": "Misto Quente e Americano" }],
//!   "items": [{ "id": "m1", "name": "Misto Quente", "price": 12, "category": "mistos",
//!               "addons": [{ "name": "Tomate", "price": 1 }] }]
//! }
//! ```

use std::path::Path;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::{OrderError, Result};

/// Parse a catalog from JSON text.
pub fn parse_catalog_str(content: &str) -> serde_json::Result<Catalog> {
    serde_json::from_str(content)
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(OrderError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("catalog not found: {}", path.display()),
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let catalog = parse_catalog_str(&content).map_err(|source| OrderError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Loaded {} item(s) in {} categor(ies) from {}",
        catalog.items.len(),
        catalog.categories.len(),
        path.display()
    );
    Ok(catalog)
}
