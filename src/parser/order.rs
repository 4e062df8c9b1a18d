//! Order request files replayed by the command line.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OrderError, Result};
use crate::model::DeliveryMode;

/// One item as picked on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequestItem {
    /// Catalog item id.
    pub id: String,
    /// Size, for the customizable item.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub toppings: Vec<String>,
    #[serde(default)]
    pub addons: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A full order: items plus delivery details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub mode: DeliveryMode,
    pub items: Vec<OrderRequestItem>,
    /// Postal code to look up when delivering.
    #[serde(default)]
    pub postal_code: Option<String>,
    /// Street number when delivering.
    #[serde(default)]
    pub number: Option<String>,
}

/// Load an order request from a JSON file.
pub fn load_order_request(path: &Path) -> Result<OrderRequest> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| OrderError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let request: OrderRequest =
            serde_json::from_str(r#"{ "items": [{ "id": "h1" }] }"#).unwrap();
        assert_eq!(request.mode, DeliveryMode::Retirada);
        assert_eq!(
            request.items,
            vec![OrderRequestItem {
                id: "h1".to_string(),
                size: None,
                toppings: Vec::new(),
                addons: Vec::new(),
                quantity: 1,
            }]
        );
    }

    #[test]
    fn test_load_full_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "mode": "entrega",
                "postal_code": "15500-000",
                "number": "12",
                "items": [
                    {{ "id": "acai-custom", "size": "500ml", "toppings": ["Granola"] }},
                    {{ "id": "h1", "addons": ["Bacon"], "quantity": 2 }}
                ]
            }}"#
        )
        .unwrap();

        let request = load_order_request(file.path()).unwrap();
        assert_eq!(request.mode, DeliveryMode::Entrega);
        assert_eq!(request.items[0].size.as_deref(), Some("500ml"));
        assert_eq!(request.items[1].quantity, 2);
        assert_eq!(request.number.as_deref(), Some("12"));
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "mode": "drone", "items": [] }}"#).unwrap();
        assert!(matches!(
            load_order_request(file.path()),
            Err(OrderError::Json { .. })
        ));
    }
}
