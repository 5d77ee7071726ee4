//! Product catalog: immutable reference data grouped by category.
//!
//! Loaded once at startup and shared behind an `Arc`. Tests build small
//! fixture catalogs with [`Catalog::new`].

mod seed;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::models::product::Product;
use crate::models::skin::ProductCategory;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_category: BTreeMap<ProductCategory, Vec<Product>>,
}

impl Catalog {
    /// Groups products by category, keeping their relative order.
    pub fn new(products: Vec<Product>) -> Self {
        let mut by_category: BTreeMap<ProductCategory, Vec<Product>> = BTreeMap::new();
        for product in products {
            by_category.entry(product.category).or_default().push(product);
        }
        Self { by_category }
    }

    pub fn builtin() -> Self {
        Self::new(seed::builtin_products())
    }

    /// Reads a JSON array of products. Duplicate ids and negative prices are rejected.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&raw).with_context(|| {
            format!("Catalog file {} is not a valid product list", path.display())
        })?;

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                bail!("Duplicate product id '{}' in catalog", product.id);
            }
            if product.price.is_sign_negative() {
                bail!("Product '{}' has a negative price", product.id);
            }
        }

        let catalog = Self::new(products);
        info!(
            "Loaded {} catalog products from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Products of one category in catalog order. Empty when the category has none.
    pub fn products_in(&self, category: ProductCategory) -> &[Product] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn all(&self) -> impl Iterator<Item = &Product> {
        self.by_category.values().flatten()
    }

    pub fn find(&self, product_id: &str) -> Option<&Product> {
        self.all().find(|p| p.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
