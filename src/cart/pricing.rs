//! Unit-price resolution for new line items.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{OrderError, Result};
use crate::model::{Addon, CatalogItem};

/// A priced configuration, ready to become a line item.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSelection {
    pub name: String,
    pub price: Decimal,
    pub extras: Vec<String>,
    pub addons: Vec<Addon>,
}

/// Size price plus the price of every chosen topping.
///
/// Toppings the item does not offer are dropped and never reach the line item.
pub fn price_customizable(
    item: &CatalogItem,
    size: Option<&str>,
    toppings: &[String],
) -> Result<PricedSelection> {
    let size = size
        .filter(|s| !s.is_empty())
        .ok_or_else(|| OrderError::SizeRequired {
            item_id: item.id.clone(),
        })?;

    let size_option = item.find_size(size).ok_or_else(|| OrderError::UnknownSize {
        item_id: item.id.clone(),
        size: size.to_string(),
    })?;

    let mut price = size_option.price;
    let mut extras = Vec::with_capacity(toppings.len());
    for name in toppings {
        match item.find_topping(name) {
            Some(topping) => {
                price += topping.price;
                extras.push(topping.name.clone());
            }
            None => warn!("Dropping topping '{}' not offered by {}", name, item.id),
        }
    }

    Ok(PricedSelection {
        name: format!("{} {}", item.name, size_option.size),
        price,
        extras,
        addons: Vec::new(),
    })
}

/// Base price plus every chosen add-on the item offers, in catalog order.
pub fn price_with_addons(item: &CatalogItem, chosen: &[String]) -> PricedSelection {
    let addons: Vec<Addon> = item
        .addons
        .iter()
        .filter(|addon| chosen.contains(&addon.name))
        .cloned()
        .collect();

    let price = item.price + addons.iter().map(|a| a.price).sum::<Decimal>();

    PricedSelection {
        name: item.name.clone(),
        price,
        extras: Vec::new(),
        addons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_custom_acai_500ml_granola_nutella() {
        let catalog = Catalog::builtin();
        let item = catalog.item("acai-custom").unwrap();

        let priced =
            price_customizable(item, Some("500ml"), &names(&["Granola", "Nutella"])).unwrap();
        assert_eq!(priced.price, dec!(24.00));
        assert_eq!(priced.name, "Monte Seu Açaí 500ml");
        assert_eq!(priced.extras, names(&["Granola", "Nutella"]));
    }

    #[test]
    fn test_every_size_topping_combination() {
        let catalog = Catalog::builtin();
        let item = catalog.item("acai-custom").unwrap();
        let toppings = item.toppings();

        let count = toppings.len();

        for size in item.sizes() {
            for mask in 0u32..(1 << count) {
                let picked: Vec<usize> = (0..count).filter(|bit| mask & (1 << *bit) != 0).collect();
                let chosen: Vec<String> = picked.iter().map(|&i| toppings[i].name.clone()).collect();
                let expected =
                    size.price + picked.iter().map(|&i| toppings[i].price).sum::<Decimal>();

                let priced = price_customizable(item, Some(size.size.as_str()), &chosen).unwrap();
                assert_eq!(priced.price, expected);
                assert_eq!(priced.extras, chosen);
            }
        }
    }

    #[test]
    fn test_missing_size_is_rejected() {
        let catalog = Catalog::builtin();
        let item = catalog.item("acai-custom").unwrap();

        assert!(matches!(
            price_customizable(item, None, &[]),
            Err(OrderError::SizeRequired { .. })
        ));
        assert!(matches!(
            price_customizable(item, Some(""), &[]),
            Err(OrderError::SizeRequired { .. })
        ));
        assert!(matches!(
            price_customizable(item, Some("1L"), &[]),
            Err(OrderError::UnknownSize { .. })
        ));
    }

    #[test]
    fn test_unknown_topping_is_dropped() {
        let catalog = Catalog::builtin();
        let item = catalog.item("acai-custom").unwrap();

        let priced = price_customizable(item, Some("300ml"), &names(&["Kiwi", "Caviar"])).unwrap();
        assert_eq!(priced.price, dec!(17));
        assert_eq!(priced.extras, names(&["Kiwi"]));
    }

    #[test]
    fn test_addons_sum_only_offered_ones() {
        let catalog = Catalog::builtin();
        let item = catalog.item("m1").unwrap();

        let priced = price_with_addons(item, &names(&["Orégano", "Bacon", "Queijo Extra"]));
        // Bacon is not a misto add-on.
        assert_eq!(priced.price, dec!(15.5));
        let addon_names: Vec<_> = priced.addons.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(addon_names, vec!["Queijo Extra", "Orégano"]);
    }

    #[test]
    fn test_no_addons_is_base_price() {
        let catalog = Catalog::builtin();
        let item = catalog.item("h1").unwrap();
        let priced = price_with_addons(item, &[]);
        assert_eq!(priced.price, dec!(32));
        assert!(priced.addons.is_empty());
        assert_eq!(priced.name, "Costela Premium");
    }

    #[test]
    fn test_every_addon_subset() {
        let catalog = Catalog::builtin();
        let item = catalog.item("c1").unwrap();
        let addons = &item.addons;
        let count = addons.len();

        for mask in 0u32..(1 << count) {
            let picked: Vec<usize> = (0..count).filter(|bit| mask & (1 << *bit) != 0).collect();
            let mut chosen: Vec<String> = picked.iter().map(|&i| addons[i].name.clone()).collect();
            // Offered only on burgers, never counted here.
            chosen.push("Hambúrguer Extra".to_string());

            let expected = item.price + picked.iter().map(|&i| addons[i].price).sum::<Decimal>();
            let priced = price_with_addons(item, &chosen);
            assert_eq!(priced.price, expected);
            assert_eq!(priced.addons.len(), picked.len());
        }
    }
}
