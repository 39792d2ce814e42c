use indexmap::IndexMap;

use crate::models::{CreateProduct, Product, ProductId, UpdateProduct};
use crate::seed::seed_products;

/// The in-memory product collection.
///
/// Insertion order is the listing order. New ids are always the last id + 1,
/// so ids stay strictly increasing along that order and never collide.
#[derive(Debug, Default, Clone)]
pub struct ProductStore {
    products: IndexMap<ProductId, Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three startup records.
    pub fn seeded() -> Self {
        Self::from_products(seed_products())
    }

    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Id the next create will receive. Deleting the last record frees its id.
    /// `None` when the last record already holds `u64::MAX`.
    pub fn next_id(&self) -> Option<ProductId> {
        match self.products.last() {
            Some((id, _)) => id.next(),
            None => Some(ProductId::FIRST),
        }
    }

    pub fn create(&mut self, payload: CreateProduct) -> Option<Product> {
        let product = Product::from_create(self.next_id()?, payload);
        self.products.insert(product.id, product.clone());
        Some(product)
    }

    pub fn update(&mut self, id: ProductId, payload: UpdateProduct) -> Option<Product> {
        let product = self.products.get_mut(&id)?;
        product.apply(payload);
        Some(product.clone())
    }

    pub fn delete(&mut self, id: ProductId) -> Option<Product> {
        // shift_remove keeps the remaining records in order
        self.products.shift_remove(&id)
    }
}
