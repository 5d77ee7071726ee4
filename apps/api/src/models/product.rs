use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::skin::{ProductCategory, SkinConcern, SkinType};

/// Catalog reference data. Never mutated after the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: ProductCategory,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    pub suitable_for: Vec<SkinType>,
    pub addresses_concerns: Vec<SkinConcern>,
}

impl Product {
    pub fn within_budget(&self, max_price: Decimal) -> bool {
        self.price <= max_price
    }

    pub fn suits(&self, skin_type: SkinType) -> bool {
        self.suitable_for.contains(&skin_type)
    }

    /// True when the product addresses at least one of `concerns`.
    /// An empty concern list never matches.
    pub fn addresses_any(&self, concerns: &[SkinConcern]) -> bool {
        self.addresses_concerns.iter().any(|c| concerns.contains(c))
    }
}
