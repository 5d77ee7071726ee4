//! Recommendation Filter: decides which catalog products are admissible for a profile.
//!
//! Pure and deterministic: the same catalog and inputs always produce the same
//! admissible sets, in catalog order. Picking among them happens elsewhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::product::Product;
use crate::models::skin::{Budget, ProductCategory, SkinConcern, SkinType};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The inputs that drive filtering, taken from a skin profile or a preview request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub skin_type: SkinType,
    pub concerns: Vec<SkinConcern>,
    pub budget: Budget,
}

/// How an admissible set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBasis {
    /// Skin type, concern and budget all matched.
    FullMatch,
    /// Nothing matched all constraints; only the budget ceiling was applied.
    BudgetOnly,
    /// Not even the budget ceiling left a candidate.
    NoCandidates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissibleSet<'a> {
    pub category: ProductCategory,
    pub basis: MatchBasis,
    pub products: Vec<&'a Product>,
}

impl AdmissibleSet<'_> {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Admissible sets for every category, borrowed from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissibleSets<'a> {
    pub criteria: FilterCriteria,
    pub max_price: rust_decimal::Decimal,
    pub categories: BTreeMap<ProductCategory, AdmissibleSet<'a>>,
}

impl<'a> AdmissibleSets<'a> {
    /// Candidates for one category; empty when the category had none.
    pub fn candidates(&self, category: ProductCategory) -> &[&'a Product] {
        self.categories
            .get(&category)
            .map(|set| set.products.as_slice())
            .unwrap_or(&[])
    }

    pub fn basis(&self, category: ProductCategory) -> MatchBasis {
        self.categories
            .get(&category)
            .map(|set| set.basis)
            .unwrap_or(MatchBasis::NoCandidates)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filtering
// ────────────────────────────────────────────────────────────────────────────

/// Full admissibility rule: within budget, suits the skin type, addresses a concern.
pub fn is_admissible(product: &Product, criteria: &FilterCriteria) -> bool {
    product.within_budget(criteria.budget.max_price())
        && product.suits(criteria.skin_type)
        && product.addresses_any(&criteria.concerns)
}

/// Filters one category, falling back to the budget ceiling alone when the
/// full rule admits nothing. An empty concern list always takes the fallback.
pub fn filter_category<'a>(
    catalog: &'a Catalog,
    category: ProductCategory,
    criteria: &FilterCriteria,
) -> AdmissibleSet<'a> {
    let products = catalog.products_in(category);

    let full: Vec<&Product> = products
        .iter()
        .filter(|p| is_admissible(p, criteria))
        .collect();
    if !full.is_empty() {
        return AdmissibleSet {
            category,
            basis: MatchBasis::FullMatch,
            products: full,
        };
    }

    let max_price = criteria.budget.max_price();
    let budget_only: Vec<&Product> = products
        .iter()
        .filter(|p| p.within_budget(max_price))
        .collect();
    let basis = if budget_only.is_empty() {
        MatchBasis::NoCandidates
    } else {
        MatchBasis::BudgetOnly
    };

    AdmissibleSet {
        category,
        basis,
        products: budget_only,
    }
}

/// Filters every category of the catalog.
pub fn filter_catalog<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> AdmissibleSets<'a> {
    let categories = ProductCategory::ALL
        .iter()
        .map(|&category| (category, filter_category(catalog, category, criteria)))
        .collect();

    AdmissibleSets {
        criteria: criteria.clone(),
        max_price: criteria.budget.max_price(),
        categories,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::test_support::product;
    use rust_decimal::Decimal;

    fn criteria(skin_type: SkinType, concerns: &[SkinConcern], budget: Budget) -> FilterCriteria {
        FilterCriteria {
            skin_type,
            concerns: concerns.to_vec(),
            budget,
        }
    }

    #[test]
    fn test_full_match_requires_all_three_constraints() {
        let (oily, dry) = (&[SkinType::Oily], &[SkinType::Dry]);
        let (acne, redness) = (&[SkinConcern::Acne], &[SkinConcern::Redness]);
        let catalog = Catalog::new(vec![
            product("ok", ProductCategory::Serum, 1000, oily, acne),
            product("pricey", ProductCategory::Serum, 6000, oily, acne),
            product("wrong-type", ProductCategory::Serum, 1000, dry, acne),
            product("wrong-concern", ProductCategory::Serum, 1000, oily, redness),
        ]);
        let c = criteria(SkinType::Oily, &[SkinConcern::Acne], Budget::Medium);

        let set = filter_category(&catalog, ProductCategory::Serum, &c);
        assert_eq!(set.basis, MatchBasis::FullMatch);
        let ids: Vec<_> = set.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn test_fallback_to_budget_only() {
        let (dry, dryness) = (&[SkinType::Dry], &[SkinConcern::Dryness]);
        let catalog = Catalog::new(vec![
            product("cheap", ProductCategory::Toner, 1500, dry, dryness),
            product("expensive", ProductCategory::Toner, 9000, dry, dryness),
        ]);
        let c = criteria(SkinType::Oily, &[SkinConcern::Acne], Budget::Medium);

        let set = filter_category(&catalog, ProductCategory::Toner, &c);
        assert_eq!(set.basis, MatchBasis::BudgetOnly);
        assert_eq!(set.products.len(), 1);
        assert_eq!(set.products[0].id, "cheap");
    }

    #[test]
    fn test_no_candidates_when_nothing_fits_budget() {
        let catalog = Catalog::new(vec![product(
            "ss1",
            ProductCategory::Sunscreen,
            3999,
            &[SkinType::Normal],
            &[SkinConcern::Aging],
        )]);
        let c = criteria(SkinType::Normal, &[SkinConcern::Aging], Budget::Low);

        let set = filter_category(&catalog, ProductCategory::Sunscreen, &c);
        assert_eq!(set.basis, MatchBasis::NoCandidates);
        assert!(set.is_empty());
    }

    #[test]
    fn test_budget_ceiling_is_inclusive() {
        let catalog = Catalog::new(vec![product(
            "edge",
            ProductCategory::Mask,
            2000,
            &[SkinType::Dry],
            &[SkinConcern::Dryness],
        )]);
        let c = criteria(SkinType::Dry, &[SkinConcern::Dryness], Budget::Low);

        let set = filter_category(&catalog, ProductCategory::Mask, &c);
        assert_eq!(set.basis, MatchBasis::FullMatch);
    }

    #[test]
    fn test_empty_concerns_force_fallback() {
        let catalog = Catalog::builtin();
        let c = criteria(SkinType::Normal, &[], Budget::High);

        let sets = filter_catalog(&catalog, &c);
        for category in ProductCategory::ALL {
            assert_eq!(
                sets.basis(*category),
                MatchBasis::BudgetOnly,
                "{category} should fall back with no concerns"
            );
            assert_eq!(
                sets.candidates(*category).len(),
                catalog.products_in(*category).len()
            );
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let catalog = Catalog::builtin();
        let c = criteria(
            SkinType::Combination,
            &[SkinConcern::Acne, SkinConcern::Dullness],
            Budget::Medium,
        );
        assert_eq!(filter_catalog(&catalog, &c), filter_catalog(&catalog, &c));
    }

    #[test]
    fn test_every_admissible_product_respects_budget() {
        let catalog = Catalog::builtin();
        for budget in Budget::ALL {
            for skin_type in SkinType::ALL {
                let c = criteria(*skin_type, &[SkinConcern::Aging], *budget);
                let sets = filter_catalog(&catalog, &c);
                for set in sets.categories.values() {
                    for p in &set.products {
                        assert!(p.price <= budget.max_price(), "{} over {budget}", p.id);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sets_keep_catalog_order() {
        let catalog = Catalog::builtin();
        let c = criteria(SkinType::Combination, &[SkinConcern::Acne], Budget::High);
        let sets = filter_catalog(&catalog, &c);
        let ids: Vec<_> = sets
            .candidates(ProductCategory::Serum)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["s2"]);
        assert_eq!(sets.max_price, Decimal::from(200));
    }

    #[test]
    fn test_missing_category_reports_no_candidates() {
        let catalog = Catalog::new(vec![]);
        let c = criteria(SkinType::Dry, &[SkinConcern::Dryness], Budget::High);
        let sets = filter_catalog(&catalog, &c);
        assert_eq!(sets.basis(ProductCategory::EyeCream), MatchBasis::NoCandidates);
        assert!(sets.candidates(ProductCategory::EyeCream).is_empty());
    }
}
