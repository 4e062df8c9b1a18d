//! Consistency checks for a loaded catalog.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::error::{OrderError, Result};
use crate::model::CatalogItem;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate the whole catalog.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    if catalog.items.is_empty() {
        return ValidationResult::error("Catalog has no items");
    }

    let mut result = ValidationResult::ok();

    let mut category_ids = HashSet::new();
    for category in &catalog.categories {
        if !category_ids.insert(category.id.as_str()) {
            result.add_error(format!("Duplicate category id '{}'", category.id));
        }
        if catalog.items_in_category(&category.id).next().is_none() {
            result.add_warning(format!("Category '{}' has no items", category.id));
        }
    }

    let mut item_ids = HashSet::new();
    for item in &catalog.items {
        if !item_ids.insert(item.id.as_str()) {
            result.add_error(format!("Duplicate item id '{}'", item.id));
        }
        if !category_ids.contains(item.category.as_str()) {
            result.add_error(format!(
                "Item '{}': category '{}' is not declared",
                item.id, item.category
            ));
        }
        result.merge(validate_item(item));
    }

    result
}

/// Validate a single catalog item.
pub fn validate_item(item: &CatalogItem) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if item.price < Decimal::ZERO {
        result.add_error(format!("Item '{}': negative price {}", item.id, item.price));
    }

    if item.customizable {
        if item.sizes().is_empty() {
            result.add_error(format!("Item '{}': customizable but has no sizes", item.id));
        }
        if !item.addons.is_empty() {
            result.add_warning(format!(
                "Item '{}': add-ons are ignored on customizable items",
                item.id
            ));
        }
    } else if item.options.is_some() {
        result.add_warning(format!(
            "Item '{}': options are ignored on fixed-price items",
            item.id
        ));
    }

    check_names(
        &mut result,
        &item.id,
        "size",
        item.sizes().iter().map(|s| (s.size.as_str(), s.price)),
    );
    check_names(
        &mut result,
        &item.id,
        "topping",
        item.toppings().iter().map(|t| (t.name.as_str(), t.price)),
    );
    check_names(
        &mut result,
        &item.id,
        "add-on",
        item.addons.iter().map(|a| (a.name.as_str(), a.price)),
    );

    result
}

/// Names must be unique within an item and prices non-negative.
fn check_names<'a>(
    result: &mut ValidationResult,
    item_id: &str,
    kind: &str,
    entries: impl Iterator<Item = (&'a str, Decimal)>,
) {
    let mut seen = HashSet::new();
    for (name, price) in entries {
        if !seen.insert(name) {
            result.add_error(format!("Item '{}': duplicate {} '{}'", item_id, kind, name));
        }
        if price < Decimal::ZERO {
            result.add_error(format!(
                "Item '{}': {} '{}' has negative price {}",
                item_id, kind, name, price
            ));
        }
    }
}

/// Fail with `InvalidCatalog` when validation does not pass.
pub fn ensure_valid(catalog: &Catalog) -> Result<ValidationResult> {
    let result = validate_catalog(catalog);

    if !result.passed {
        return Err(OrderError::InvalidCatalog {
            message: result.errors.join("; "),
        });
    }

    Ok(result)
}
