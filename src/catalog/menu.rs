//! Built-in menu data.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::Catalog;
use crate::model::{Addon, CatalogItem, Category, ItemOptions, SizeOption, Topping};

/// Category selected when the menu opens.
pub const DEFAULT_CATEGORY: &str = "artesanais";

fn addons(list: &[(&str, Decimal)]) -> Vec<Addon> {
    list.iter()
        .map(|(name, price)| Addon::new(*name, *price))
        .collect()
}

fn burger_addons() -> Vec<Addon> {
    addons(&[
        ("Bacon", dec!(4)),
        ("Hambúrguer Extra", dec!(8)),
        ("Queijo Extra", dec!(3)),
        ("Alface", dec!(1)),
        ("Tomate", dec!(1)),
        ("Molho Caseiro", dec!(2)),
        ("Cebola Caramelizada", dec!(3)),
        ("Ovo", dec!(2)),
    ])
}

fn hotdog_addons() -> Vec<Addon> {
    addons(&[
        ("Salsicha Extra", dec!(4)),
        ("Bacon", dec!(4)),
        ("Queijo Extra", dec!(3)),
        ("Batata Palha Extra", dec!(2)),
        ("Molho Caseiro", dec!(2)),
    ])
}

fn misto_addons() -> Vec<Addon> {
    addons(&[
        ("Queijo Extra", dec!(3)),
        ("Presunto Extra", dec!(3)),
        ("Tomate", dec!(1)),
        ("Orégano", dec!(0.5)),
    ])
}

fn calabresa_addons() -> Vec<Addon> {
    addons(&[
        ("Calabresa Extra", dec!(6)),
        ("Queijo Extra", dec!(3)),
        ("Cebola", dec!(1)),
        ("Vinagrete Extra", dec!(2)),
        ("Molho Caseiro", dec!(2)),
    ])
}

fn frango_addons() -> Vec<Addon> {
    addons(&[
        ("Frango Extra", dec!(7)),
        ("Queijo Extra", dec!(3)),
        ("Bacon", dec!(4)),
        ("Alface", dec!(1)),
        ("Tomate", dec!(1)),
        ("Molho Caseiro", dec!(2)),
    ])
}

fn contrafile_addons() -> Vec<Addon> {
    addons(&[
        ("Contra Filé Extra", dec!(10)),
        ("Queijo Extra", dec!(3)),
        ("Bacon", dec!(4)),
        ("Cebola Caramelizada", dec!(3)),
        ("Molho Caseiro", dec!(2)),
    ])
}

fn bauru_addons() -> Vec<Addon> {
    addons(&[
        ("Rosbife Extra", dec!(8)),
        ("Queijo Extra", dec!(3)),
        ("Tomate", dec!(1)),
        ("Molho Caseiro", dec!(2)),
    ])
}

fn acai_options() -> ItemOptions {
    let sizes = [("300ml", dec!(14)), ("500ml", dec!(18)), ("700ml", dec!(22))]
        .into_iter()
        .map(|(size, price)| SizeOption {
            size: size.to_string(),
            price,
        })
        .collect();

    let toppings = [
        ("Granola", dec!(2)),
        ("Banana", dec!(2)),
        ("Morango", dec!(3)),
        ("Leite em Pó", dec!(2)),
        ("Leite Condensado", dec!(2)),
        ("Nutella", dec!(4)),
        ("Paçoca", dec!(2)),
        ("Kiwi", dec!(3)),
        ("M&Ms", dec!(3)),
        ("Chocolate Granulado", dec!(2)),
    ]
    .into_iter()
    .map(|(name, price)| Topping {
        name: name.to_string(),
        price,
    })
    .collect();

    ItemOptions { sizes, toppings }
}

pub(super) fn builtin_catalog() -> Catalog {
    let categories = vec![
        Category::new("acai-combos", "Combos de Açaí"),
        Category::new("acai-custom", "Monte Seu Açaí"),
        Category::new("artesanais", "Hambúrgueres Artesanais de Costela"),
        Category::new("hotdog", "Cachorro Quente"),
        Category::new("mistos", "Misto Quente e Americano"),
        Category::new("calabresa", "Lanches de Calabresa"),
        Category::new("frango", "Lanches de Peito de Frango"),
        Category::new("contrafile", "Lanches de Contra Filé"),
        Category::new("bauru", "Baurus"),
    ];

    let items = vec![
        CatalogItem::fixed(
            "acai1",
            "Açaí Tradicional",
            "Açaí 500ml com banana, granola e leite condensado",
            dec!(18),
            "acai-combos",
        ),
        CatalogItem::fixed(
            "acai2",
            "Açaí Power",
            "Açaí 500ml com morango, banana, granola, leite em pó e leite condensado",
            dec!(22),
            "acai-combos",
        ),
        CatalogItem::fixed(
            "acai3",
            "Açaí Nutella",
            "Açaí 500ml com nutella, morango, granola e leite condensado",
            dec!(25),
            "acai-combos",
        ),
        CatalogItem::fixed(
            "acai-custom",
            "Monte Seu Açaí",
            "Escolha o tamanho e os acompanhamentos do seu açaí",
            dec!(0),
            "acai-custom",
        )
        .with_options(acai_options()),
        CatalogItem::fixed(
            "h1",
            "Costela Premium",
            "Hambúrguer artesanal de costela 180g, queijo cheddar, bacon, alface, tomate e molho especial",
            dec!(32),
            "artesanais",
        )
        .with_addons(burger_addons()),
        CatalogItem::fixed(
            "h2",
            "Costela BBQ",
            "Hambúrguer artesanal de costela 180g, queijo, cebola caramelizada e molho barbecue",
            dec!(30),
            "artesanais",
        )
        .with_addons(burger_addons()),
        CatalogItem::fixed(
            "c1",
            "Hot Dog Completo",
            "Salsicha, purê, vinagrete, batata palha, milho, ervilha e molhos",
            dec!(18),
            "hotdog",
        )
        .with_addons(hotdog_addons()),
        CatalogItem::fixed(
            "m1",
            "Misto Quente",
            "Pão francês, presunto e queijo derretido",
            dec!(12),
            "mistos",
        )
        .with_addons(misto_addons()),
        CatalogItem::fixed(
            "m2",
            "Americano",
            "Pão francês, presunto, queijo, ovo, alface e tomate",
            dec!(15),
            "mistos",
        )
        .with_addons(misto_addons()),
        CatalogItem::fixed(
            "l1",
            "Calabresa Especial",
            "Calabresa fatiada, queijo, vinagrete e molho",
            dec!(25),
            "calabresa",
        )
        .with_addons(calabresa_addons()),
        CatalogItem::fixed(
            "f1",
            "Frango Supreme",
            "Peito de frango grelhado, queijo, alface, tomate e maionese especial",
            dec!(28),
            "frango",
        )
        .with_addons(frango_addons()),
        CatalogItem::fixed(
            "cf1",
            "Contra Filé Especial",
            "Contra filé fatiado, queijo, cebola grelhada e molho",
            dec!(35),
            "contrafile",
        )
        .with_addons(contrafile_addons()),
        CatalogItem::fixed(
            "b1",
            "Bauru Tradicional",
            "Rosbife, queijo derretido, tomate e molho especial",
            dec!(22),
            "bauru",
        )
        .with_addons(bauru_addons()),
    ];

    Catalog { categories, items }
}
