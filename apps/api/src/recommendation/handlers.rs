use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::product::Product;
use crate::models::skin::ProductCategory;
use crate::recommendation::filter::{filter_catalog, FilterCriteria, MatchBasis};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CatalogQuery {
    pub category: Option<ProductCategory>,
}

/// GET /api/v1/catalog
pub async fn handle_list_catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = match params.category {
        Some(category) => state.catalog.products_in(category).to_vec(),
        None => state.catalog.all().cloned().collect(),
    };
    Ok(Json(products))
}

#[derive(Serialize)]
pub struct PreviewCategory {
    pub category: ProductCategory,
    pub basis: MatchBasis,
    pub products: Vec<Product>,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub criteria: FilterCriteria,
    pub max_price: Decimal,
    pub categories: Vec<PreviewCategory>,
}

/// POST /api/v1/recommendations/preview
///
/// Admissible sets only; nothing is picked or stored.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<PreviewResponse>, AppError> {
    let sets = filter_catalog(&state.catalog, &criteria);

    let categories = sets
        .categories
        .values()
        .map(|set| PreviewCategory {
            category: set.category,
            basis: set.basis,
            products: set.products.iter().map(|p| (*p).clone()).collect(),
        })
        .collect();

    Ok(Json(PreviewResponse {
        criteria: sets.criteria.clone(),
        max_price: sets.max_price,
        categories,
    }))
}
