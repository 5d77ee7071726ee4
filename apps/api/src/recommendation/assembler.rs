//! Routine Assembler: turns admissible sets into morning, evening and weekly steps.
//!
//! Flow: filter_catalog → one pick per template slot → SkincareRoutine.
//!
//! Order numbers are fixed per template slot. A slot with no candidate is left
//! out and reported in `unavailable`; the remaining steps keep their numbers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::profile::SkinProfile;
use crate::models::routine::{RoutinePhase, RoutineStep, SkincareRoutine};
use crate::models::skin::{Budget, Frequency, ProductCategory, SkinConcern, SkinType};
use crate::recommendation::filter::{filter_catalog, AdmissibleSets, FilterCriteria};
use crate::recommendation::picker::ProductPicker;

use ProductCategory::*;

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

const MORNING_TEMPLATE: &[ProductCategory] = &[Cleanser, Toner, Serum, Moisturizer, Sunscreen];
const EVENING_TEMPLATE: &[ProductCategory] =
    &[Cleanser, Toner, Serum, Treatment, Moisturizer, EyeCream];
const WEEKLY_TEMPLATE: &[ProductCategory] = &[Exfoliator, Mask];

/// Category sequence for a phase. Slot `i` always has order `i + 1`.
pub fn template(phase: RoutinePhase) -> &'static [ProductCategory] {
    match phase {
        RoutinePhase::Morning => MORNING_TEMPLATE,
        RoutinePhase::Evening => EVENING_TEMPLATE,
        RoutinePhase::Weekly => WEEKLY_TEMPLATE,
    }
}

/// Template order number of `category` within `phase`, if the phase uses it.
pub fn template_order(phase: RoutinePhase, category: ProductCategory) -> Option<u32> {
    template(phase)
        .iter()
        .position(|c| *c == category)
        .and_then(|i| u32::try_from(i + 1).ok())
}

fn frequency_for(phase: RoutinePhase) -> Frequency {
    match phase {
        RoutinePhase::Morning | RoutinePhase::Evening => Frequency::Daily,
        RoutinePhase::Weekly => Frequency::Weekly,
    }
}

/// Usage text stamped on every populated step.
pub fn instructions_for(category: ProductCategory) -> &'static str {
    match category {
        Cleanser => "Gently massage onto damp skin and rinse with lukewarm water.",
        Toner => "Apply to clean skin with a cotton pad or fingertips.",
        Serum => "Apply a few drops to face and neck, gently pat into skin.",
        Moisturizer => "Apply a small amount to face and neck.",
        Sunscreen => {
            "Apply generously to face and neck as the final step of your morning routine."
        }
        Treatment => "Apply a small amount to face and neck, avoiding the eye area.",
        EyeCream => "Gently pat a small amount around the eye area using your ring finger.",
        Exfoliator => {
            "Use 1-2 times per week after cleansing. Avoid using with other active ingredients."
        }
        Mask => "Apply a thin layer to clean skin. Leave on for 10-15 minutes, then rinse off.",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// A template slot that could not be populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableSlot {
    pub phase: RoutinePhase,
    pub order: u32,
    pub category: ProductCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutineAssembly {
    pub routine: SkincareRoutine,
    pub unavailable: Vec<UnavailableSlot>,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

fn assemble_phase(
    phase: RoutinePhase,
    sets: &AdmissibleSets<'_>,
    picker: &mut dyn ProductPicker,
    unavailable: &mut Vec<UnavailableSlot>,
) -> Vec<RoutineStep> {
    let mut steps = Vec::new();

    for (order, &category) in (1u32..).zip(template(phase)) {
        match picker.pick(sets.candidates(category)) {
            Some(product) => steps.push(RoutineStep {
                order,
                product_id: product.id.clone(),
                product: product.clone(),
                frequency: frequency_for(phase),
                instructions: Some(instructions_for(category).to_string()),
            }),
            None => {
                warn!(
                    phase = phase.as_str(),
                    order,
                    category = category.as_str(),
                    "No candidate available for routine slot; omitting step"
                );
                unavailable.push(UnavailableSlot {
                    phase,
                    order,
                    category,
                });
            }
        }
    }

    steps
}

/// Builds a routine from precomputed admissible sets.
pub fn assemble_routine(
    user_id: Uuid,
    skin_profile_id: Uuid,
    sets: &AdmissibleSets<'_>,
    picker: &mut dyn ProductPicker,
) -> RoutineAssembly {
    let mut unavailable = Vec::new();
    let morning_routine = assemble_phase(RoutinePhase::Morning, sets, picker, &mut unavailable);
    let evening_routine = assemble_phase(RoutinePhase::Evening, sets, picker, &mut unavailable);
    let weekly_routine = assemble_phase(RoutinePhase::Weekly, sets, picker, &mut unavailable);

    let now = Utc::now();
    let routine = SkincareRoutine {
        id: Uuid::new_v4(),
        user_id,
        skin_profile_id,
        morning_routine,
        evening_routine,
        weekly_routine,
        created_at: now,
        updated_at: now,
    };

    debug!(
        "Assembled routine {} with {} steps ({} slots unavailable)",
        routine.id,
        routine.step_count(),
        unavailable.len()
    );

    RoutineAssembly {
        routine,
        unavailable,
    }
}

/// Filters the catalog and assembles a routine. Needs no I/O and never fails;
/// the worst case is a routine with every slot reported unavailable.
pub fn generate_routine(
    catalog: &Catalog,
    picker: &mut dyn ProductPicker,
    user_id: Uuid,
    skin_profile_id: Uuid,
    skin_type: SkinType,
    concerns: &[SkinConcern],
    budget: Budget,
) -> RoutineAssembly {
    let criteria = FilterCriteria {
        skin_type,
        concerns: concerns.to_vec(),
        budget,
    };
    let sets = filter_catalog(catalog, &criteria);
    assemble_routine(user_id, skin_profile_id, &sets, picker)
}

pub fn generate_for_profile(
    catalog: &Catalog,
    picker: &mut dyn ProductPicker,
    profile: &SkinProfile,
) -> RoutineAssembly {
    generate_routine(
        catalog,
        picker,
        profile.user_id,
        profile.id,
        profile.skin_type,
        &profile.skin_concerns,
        profile.budget,
    )
}

/// Template slots with no step in `routine`, in template order. Rebuilds the
/// `unavailable` report for a routine loaded from storage.
pub fn missing_slots(routine: &SkincareRoutine) -> Vec<UnavailableSlot> {
    RoutinePhase::ALL
        .into_iter()
        .flat_map(|phase| {
            let steps = routine.steps(phase);
            (1u32..)
                .zip(template(phase))
                .filter(move |(order, _)| !steps.iter().any(|s| s.order == *order))
                .map(move |(order, &category)| UnavailableSlot {
                    phase,
                    order,
                    category,
                })
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
