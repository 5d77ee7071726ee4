//! Built-in product catalog used when no `CATALOG_PATH` is configured.

use rust_decimal::Decimal;

use crate::models::product::Product;
use crate::models::skin::{ProductCategory, SkinConcern, SkinType};

use ProductCategory as Cat;
use SkinConcern::*;
use SkinType::*;

const IMG_CLEANSER: &str = "https://images.unsplash.com/photo-1556228720-195a672e8a03?w=300&q=80";
const IMG_TONER: &str = "https://images.unsplash.com/photo-1616683693504-3ea7e9ad6fec?w=300&q=80";
const IMG_SERUM: &str = "https://images.unsplash.com/photo-1620916566398-39f1143ab7be?w=300&q=80";
const IMG_MOISTURIZER: &str =
    "https://images.unsplash.com/photo-1593560368921-892072b8d81c?w=300&q=80";
const IMG_SUNSCREEN: &str = "https://images.unsplash.com/photo-1556228841-a3d3b069c2c8?w=300&q=80";
const IMG_MASK: &str = "https://images.unsplash.com/photo-1596755094514-f87e34085b2c?w=300&q=80";
const IMG_EXFOLIATOR: &str =
    "https://images.unsplash.com/photo-1567721913486-6585f069b332?w=300&q=80";

struct Seed {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    category: ProductCategory,
    description: &'static str,
    cents: i64,
    image: &'static str,
    suitable_for: &'static [SkinType],
    concerns: &'static [SkinConcern],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "c1",
        name: "Gentle Foaming Cleanser",
        brand: "CeraVe",
        category: Cat::Cleanser,
        description: "Gentle foaming cleanser that clears excess oil without stripping the skin.",
        cents: 1499,
        image: IMG_CLEANSER,
        suitable_for: &[Normal, Combination, Oily],
        concerns: &[Acne],
    },
    Seed {
        id: "c2",
        name: "Hydrating Facial Cleanser",
        brand: "CeraVe",
        category: Cat::Cleanser,
        description: "Hydrating cleanser with ceramides and hyaluronic acid to maintain moisture.",
        cents: 1599,
        image: IMG_CLEANSER,
        suitable_for: &[Dry, Normal, Sensitive],
        concerns: &[Dryness, Sensitivity],
    },
    Seed {
        id: "c3",
        name: "Soothing Gel Cleanser",
        brand: "La Roche-Posay",
        category: Cat::Cleanser,
        description: "Gentle gel cleanser that soothes and calms irritated skin.",
        cents: 2499,
        image: IMG_CLEANSER,
        suitable_for: &[Sensitive, Combination],
        concerns: &[Redness, Sensitivity],
    },
    Seed {
        id: "t1",
        name: "Hydrating Toner",
        brand: "Klairs",
        category: Cat::Toner,
        description: "Alcohol-free toner that hydrates and prepares skin for the next steps.",
        cents: 1999,
        image: IMG_TONER,
        suitable_for: &[Dry, Normal, Sensitive],
        concerns: &[Dryness, Dullness],
    },
    Seed {
        id: "t2",
        name: "BHA Liquid Exfoliant",
        brand: "Paula's Choice",
        category: Cat::Toner,
        description: "Chemical exfoliant that unclogs pores and smooths skin texture.",
        cents: 2999,
        image: IMG_TONER,
        suitable_for: &[Oily, Combination],
        concerns: &[Acne, Texture],
    },
    Seed {
        id: "s1",
        name: "Hyaluronic Acid Serum",
        brand: "The Ordinary",
        category: Cat::Serum,
        description: "Hydrating serum that plumps skin and reduces fine lines.",
        cents: 799,
        image: IMG_SERUM,
        suitable_for: &[Dry, Normal, Combination, Sensitive],
        concerns: &[Dryness, Aging, Wrinkles],
    },
    Seed {
        id: "s2",
        name: "Niacinamide 10% + Zinc 1%",
        brand: "The Ordinary",
        category: Cat::Serum,
        description: "Serum that reduces sebum production and improves skin texture.",
        cents: 599,
        image: IMG_SERUM,
        suitable_for: &[Oily, Combination],
        concerns: &[Acne, Texture],
    },
    Seed {
        id: "s3",
        name: "Vitamin C Serum",
        brand: "SkinCeuticals",
        category: Cat::Serum,
        description: "Antioxidant serum that brightens skin and defends against pollution.",
        cents: 16999,
        image: IMG_SERUM,
        suitable_for: &[Normal, Combination, Dry],
        concerns: &[Dullness, Hyperpigmentation, Aging],
    },
    Seed {
        id: "m1",
        name: "Daily Moisturizing Lotion",
        brand: "CeraVe",
        category: Cat::Moisturizer,
        description: "Lightweight moisturizer with ceramides and hyaluronic acid.",
        cents: 1399,
        image: IMG_MOISTURIZER,
        suitable_for: &[Normal, Combination, Oily],
        concerns: &[Dryness],
    },
    Seed {
        id: "m2",
        name: "Moisturizing Cream",
        brand: "CeraVe",
        category: Cat::Moisturizer,
        description: "Rich cream that provides 24-hour hydration for dry skin.",
        cents: 1699,
        image: IMG_MOISTURIZER,
        suitable_for: &[Dry, Sensitive],
        concerns: &[Dryness, Sensitivity],
    },
    Seed {
        id: "m3",
        name: "Oil-Free Moisturizer",
        brand: "Neutrogena",
        category: Cat::Moisturizer,
        description: "Lightweight, oil-free moisturizer that won't clog pores.",
        cents: 1199,
        image: IMG_MOISTURIZER,
        suitable_for: &[Oily, Combination],
        concerns: &[Acne],
    },
    Seed {
        id: "ss1",
        name: "Ultra-Light Daily UV Defense SPF 50",
        brand: "Kiehl's",
        category: Cat::Sunscreen,
        description: "Lightweight sunscreen that protects against UVA and UVB rays.",
        cents: 3999,
        image: IMG_SUNSCREEN,
        suitable_for: &[Normal, Combination, Oily],
        concerns: &[Aging, Hyperpigmentation],
    },
    Seed {
        id: "ss2",
        name: "Mineral Sunscreen SPF 30",
        brand: "La Roche-Posay",
        category: Cat::Sunscreen,
        description: "Mineral sunscreen suitable for sensitive skin.",
        cents: 2999,
        image: IMG_SUNSCREEN,
        suitable_for: &[Sensitive, Dry],
        concerns: &[Sensitivity, Redness],
    },
    Seed {
        id: "ma1",
        name: "Hydrating Overnight Mask",
        brand: "Laneige",
        category: Cat::Mask,
        description: "Overnight mask that deeply hydrates and plumps skin.",
        cents: 2599,
        image: IMG_MASK,
        suitable_for: &[Dry, Normal, Combination],
        concerns: &[Dryness, Dullness],
    },
    Seed {
        id: "ma2",
        name: "Clay Mask",
        brand: "Aztec Secret",
        category: Cat::Mask,
        description: "Deep cleansing clay mask that draws out impurities.",
        cents: 999,
        image: IMG_MASK,
        suitable_for: &[Oily, Combination],
        concerns: &[Acne],
    },
    Seed {
        id: "e1",
        name: "AHA 30% + BHA 2% Peeling Solution",
        brand: "The Ordinary",
        category: Cat::Exfoliator,
        description: "Chemical exfoliant that improves skin texture and brightness.",
        cents: 799,
        image: IMG_EXFOLIATOR,
        suitable_for: &[Normal, Combination, Oily],
        concerns: &[Texture, Dullness, Hyperpigmentation],
    },
    Seed {
        id: "e2",
        name: "Gentle Exfoliating Scrub",
        brand: "Cetaphil",
        category: Cat::Exfoliator,
        description: "Gentle physical exfoliant suitable for sensitive skin.",
        cents: 1199,
        image: IMG_EXFOLIATOR,
        suitable_for: &[Sensitive, Dry],
        concerns: &[Texture, Dullness],
    },
    Seed {
        id: "ec1",
        name: "Eye Contour Cream",
        brand: "Kiehl's",
        category: Cat::EyeCream,
        description: "Hydrating eye cream that reduces puffiness and dark circles.",
        cents: 3299,
        image: IMG_TONER,
        suitable_for: &[Normal, Dry, Combination],
        concerns: &[Aging, Dryness, Wrinkles],
    },
    Seed {
        id: "tr1",
        name: "Retinol 0.5% in Squalane",
        brand: "The Ordinary",
        category: Cat::Treatment,
        description: "Retinol treatment that reduces fine lines and improves skin texture.",
        cents: 599,
        image: IMG_SERUM,
        suitable_for: &[Normal, Combination, Oily],
        concerns: &[Aging, Texture, Hyperpigmentation, Wrinkles],
    },
    Seed {
        id: "tr2",
        name: "Azelaic Acid Suspension 10%",
        brand: "The Ordinary",
        category: Cat::Treatment,
        description: "Treatment that brightens skin tone and reduces redness.",
        cents: 799,
        image: IMG_SERUM,
        suitable_for: &[Sensitive, Combination],
        concerns: &[Redness, Hyperpigmentation, Acne],
    },
];

pub fn builtin_products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            brand: seed.brand.to_string(),
            category: seed.category,
            description: seed.description.to_string(),
            price: Decimal::new(seed.cents, 2),
            image_url: seed.image.to_string(),
            affiliate_link: Some(format!("https://example.com/product/{}", seed.id)),
            ingredients: Vec::new(),
            suitable_for: seed.suitable_for.to_vec(),
            addresses_concerns: seed.concerns.to_vec(),
        })
        .collect()
}
