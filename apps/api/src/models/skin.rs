use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error returned when a stored or submitted label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a snake_case string enum with `as_str`, `ALL`, `Display` and `FromStr`.
/// The database stores these as plain text, so the labels must match serde's.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

labelled_enum! {
    /// Baseline skin behaviour chosen in the first quiz step.
    SkinType, "skin type" {
        Dry => "dry",
        Oily => "oily",
        Combination => "combination",
        Normal => "normal",
        Sensitive => "sensitive",
    }
}

labelled_enum! {
    SkinConcern, "skin concern" {
        Acne => "acne",
        Aging => "aging",
        Dryness => "dryness",
        Dullness => "dullness",
        Hyperpigmentation => "hyperpigmentation",
        Redness => "redness",
        Sensitivity => "sensitivity",
        Texture => "texture",
        Wrinkles => "wrinkles",
    }
}

labelled_enum! {
    /// Spending tier. Each tier caps the price of every individual product.
    Budget, "budget" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

labelled_enum! {
    ProductCategory, "product category" {
        Cleanser => "cleanser",
        Toner => "toner",
        Serum => "serum",
        Moisturizer => "moisturizer",
        Sunscreen => "sunscreen",
        Mask => "mask",
        Exfoliator => "exfoliator",
        EyeCream => "eye_cream",
        Treatment => "treatment",
    }
}

labelled_enum! {
    Frequency, "frequency" {
        Daily => "daily",
        Weekly => "weekly",
        Biweekly => "biweekly",
        Monthly => "monthly",
    }
}

impl Budget {
    /// Inclusive per-product price ceiling, in the catalog's currency unit.
    pub fn max_price(&self) -> Decimal {
        match self {
            Budget::Low => Decimal::from(20),
            Budget::Medium => Decimal::from(50),
            Budget::High => Decimal::from(200),
        }
    }
}

/// Parses a list of stored labels, failing on the first unknown one.
pub fn parse_labels<T>(labels: &[String]) -> Result<Vec<T>, UnknownVariant>
where
    T: FromStr<Err = UnknownVariant>,
{
    labels.iter().map(|label| label.parse()).collect()
}
