//! Product Picker: the only source of randomness in routine generation.
//!
//! The assembler asks a `ProductPicker` for one product per slot. Production
//! uses `RandomPicker`; a fixed seed (`SELECTION_SEED`) makes picks reproducible.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::models::product::Product;

pub trait ProductPicker: Send {
    /// Returns one of `candidates`, or `None` when there are none.
    fn pick<'a>(&mut self, candidates: &[&'a Product]) -> Option<&'a Product>;
}

/// Uniform pick backed by a seedable `StdRng`.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is configured, OS-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl ProductPicker for RandomPicker {
    fn pick<'a>(&mut self, candidates: &[&'a Product]) -> Option<&'a Product> {
        candidates.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skin::{ProductCategory, SkinConcern, SkinType};
    use crate::recommendation::test_support::product;

    fn candidates() -> Vec<Product> {
        (0..5)
            .map(|i| {
                product(
                    &format!("p{i}"),
                    ProductCategory::Serum,
                    1000,
                    &[SkinType::Normal],
                    &[SkinConcern::Aging],
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_candidates_pick_nothing() {
        let mut picker = RandomPicker::seeded(7);
        assert!(picker.pick(&[]).is_none());
    }

    #[test]
    fn test_single_candidate_is_always_picked() {
        let only = candidates().remove(0);
        let mut picker = RandomPicker::from_os_rng();
        for _ in 0..20 {
            assert_eq!(picker.pick(&[&only]).unwrap().id, "p0");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let products = candidates();
        let refs: Vec<&Product> = products.iter().collect();

        let mut a = RandomPicker::seeded(42);
        let mut b = RandomPicker::seeded(42);
        let seq_a: Vec<_> = (0..10).map(|_| a.pick(&refs).unwrap().id.clone()).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.pick(&refs).unwrap().id.clone()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_picks_stay_within_candidates() {
        let products = candidates();
        let refs: Vec<&Product> = products.iter().collect();
        let mut picker = RandomPicker::from_seed(None);
        for _ in 0..50 {
            let picked = picker.pick(&refs).unwrap();
            assert!(products.iter().any(|p| p.id == picked.id));
        }
    }
}
