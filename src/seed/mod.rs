use serde_json::Number;
use tracing::info;

use crate::models::{Product, ProductId};

struct SeedRecord {
    name: &'static str,
    description: &'static str,
    price: u64,
    category: &'static str,
    in_stock: bool,
}

static SEED: &[SeedRecord] = &[
    SeedRecord {
        name: "Laptop",
        description: "High-performance laptop with 16GB RAM",
        price: 1200,
        category: "electronics",
        in_stock: true,
    },
    SeedRecord {
        name: "Smartphone",
        description: "Latest model with 128GB storage",
        price: 800,
        category: "electronics",
        in_stock: true,
    },
    SeedRecord {
        name: "Coffee Maker",
        description: "Programmable coffee maker with timer",
        price: 50,
        category: "kitchen",
        in_stock: false,
    },
];

/// The fixed records every process starts with, numbered 1, 2, 3.
///
/// Ids are integers here. Earlier deployments stored them as the strings
/// "1".."3" and only matched numeric lookups through loose equality.
pub fn seed_products() -> Vec<Product> {
    let products: Vec<Product> = SEED
        .iter()
        .zip(1..)
        .map(|(record, id)| Product {
            id: ProductId(id),
            name: Some(record.name.to_string()),
            description: Some(record.description.to_string()),
            price: Some(Number::from(record.price)),
            category: Some(record.category.to_string()),
            in_stock: Some(record.in_stock),
        })
        .collect();

    info!("Seeded {} products", products.len());
    products
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_records_with_sequential_ids() {
        let products = seed_products();
        let ids: Vec<u64> = products.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn coffee_maker_is_out_of_stock() {
        let products = seed_products();
        let coffee = &products[2];
        assert_eq!(coffee.name.as_deref(), Some("Coffee Maker"));
        assert_eq!(coffee.category.as_deref(), Some("kitchen"));
        assert_eq!(coffee.in_stock, Some(false));
        assert_eq!(coffee.price.as_ref().and_then(|p| p.as_u64()), Some(50));
    }
}
