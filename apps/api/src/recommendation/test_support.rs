use rust_decimal::Decimal;

use crate::models::product::Product;
use crate::models::skin::{ProductCategory, SkinConcern, SkinType};
use crate::recommendation::picker::ProductPicker;

/// Builds a fixture product. `cents` is the price in hundredths.
pub fn product(
    id: &str,
    category: ProductCategory,
    cents: i64,
    suitable_for: &[SkinType],
    concerns: &[SkinConcern],
) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        brand: "Fixture".to_string(),
        category,
        description: format!("Fixture {category}"),
        price: Decimal::new(cents, 2),
        image_url: format!("https://example.com/{id}.png"),
        affiliate_link: None,
        ingredients: Vec::new(),
        suitable_for: suitable_for.to_vec(),
        addresses_concerns: concerns.to_vec(),
    }
}

/// Always takes the first candidate, so tests can pin the pick.
pub struct FirstPicker;

impl ProductPicker for FirstPicker {
    fn pick<'a>(&mut self, candidates: &[&'a Product]) -> Option<&'a Product> {
        candidates.first().copied()
    }
}
