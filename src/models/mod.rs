pub mod product;

pub use product::{CreateProduct, Product, ProductId, UpdateProduct};
