//! Profile/Routine lifecycle: quiz submission, routine viewing and regeneration.
//!
//! States: NoProfile → ProfileOnly → ProfileAndRoutine, always resolved from the
//! latest profile by creation time and the latest routine generated from it.
//!
//! Durability is at-most-once. A failed profile or routine insert is logged and
//! the value just built is returned with `*_persisted: false`; nothing retries.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::lifecycle::validation::ValidQuiz;
use crate::models::profile::SkinProfile;
use crate::models::routine::SkincareRoutine;
use crate::persistence::{PersistenceError, PersistenceGateway};
use crate::recommendation::assembler::{
    generate_for_profile, missing_slots, RoutineAssembly, UnavailableSlot,
};
use crate::recommendation::picker::ProductPicker;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    NoProfile,
    ProfileOnly(SkinProfile),
    ProfileAndRoutine(SkinProfile, SkincareRoutine),
}

/// What the caller gets back from any routine-producing path.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineOutcome {
    pub profile: SkinProfile,
    pub routine: SkincareRoutine,
    pub unavailable: Vec<UnavailableSlot>,
    pub profile_persisted: bool,
    pub routine_persisted: bool,
    /// False when an existing stored routine was returned as-is.
    pub freshly_generated: bool,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("No skin profile found for user {0}; complete the skin quiz first")]
    NoProfile(Uuid),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

// ────────────────────────────────────────────────────────────────────────────
// State resolution
// ────────────────────────────────────────────────────────────────────────────

pub async fn resolve_state(
    gateway: &dyn PersistenceGateway,
    user_id: Uuid,
) -> Result<LifecycleState, PersistenceError> {
    let Some(profile) = gateway.latest_profile(user_id).await? else {
        return Ok(LifecycleState::NoProfile);
    };

    match gateway.latest_routine(user_id, profile.id).await? {
        Some(routine) => Ok(LifecycleState::ProfileAndRoutine(profile, routine)),
        None => Ok(LifecycleState::ProfileOnly(profile)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transitions
// ────────────────────────────────────────────────────────────────────────────

/// Best-effort insert of a freshly assembled routine.
async fn persist_routine(
    gateway: &dyn PersistenceGateway,
    assembly: RoutineAssembly,
) -> (SkincareRoutine, Vec<UnavailableSlot>, bool) {
    let RoutineAssembly {
        routine,
        unavailable,
    } = assembly;

    match gateway.insert_routine(&routine).await {
        Ok(stored) => (stored, unavailable, true),
        Err(e) => {
            warn!(
                "Failed to persist routine {} for user {}: {e}; using in-memory routine",
                routine.id, routine.user_id
            );
            (routine, unavailable, false)
        }
    }
}

/// Quiz submission: always a new profile, always a fresh routine.
///
/// The routine is only inserted when the profile insert succeeded, so a stored
/// routine never points at a profile that was not stored.
pub async fn submit_quiz(
    gateway: &dyn PersistenceGateway,
    catalog: &Catalog,
    picker: &mut dyn ProductPicker,
    quiz: ValidQuiz,
) -> RoutineOutcome {
    let local = SkinProfile::new(
        quiz.user_id,
        quiz.skin_type,
        quiz.skin_concerns,
        quiz.allergies,
        quiz.budget,
    );
    let assembly = generate_for_profile(catalog, picker, &local);

    let (profile, profile_persisted) = match gateway.insert_profile(&local).await {
        Ok(stored) => (stored, true),
        Err(e) => {
            warn!(
                "Failed to persist skin profile {} for user {}: {e}; using in-memory profile",
                local.id, local.user_id
            );
            (local, false)
        }
    };

    let (routine, unavailable, routine_persisted) = if profile_persisted {
        persist_routine(gateway, assembly).await
    } else {
        (assembly.routine, assembly.unavailable, false)
    };

    info!(
        "Quiz submitted for user {}: profile {} routine {} ({} steps, {} unavailable)",
        profile.user_id,
        profile.id,
        routine.id,
        routine.step_count(),
        unavailable.len()
    );

    RoutineOutcome {
        profile,
        routine,
        unavailable,
        profile_persisted,
        routine_persisted,
        freshly_generated: true,
    }
}

/// Generates and stores a routine for an already-stored profile.
async fn generate_and_persist(
    gateway: &dyn PersistenceGateway,
    catalog: &Catalog,
    picker: &mut dyn ProductPicker,
    profile: SkinProfile,
) -> RoutineOutcome {
    let assembly = generate_for_profile(catalog, picker, &profile);
    let (routine, unavailable, routine_persisted) = persist_routine(gateway, assembly).await;

    RoutineOutcome {
        profile,
        routine,
        unavailable,
        profile_persisted: true,
        routine_persisted,
        freshly_generated: true,
    }
}

/// Returns the active routine, generating one when the latest profile has none.
/// A failed routine lookup degrades to generation rather than an error.
pub async fn view_routine(
    gateway: &dyn PersistenceGateway,
    catalog: &Catalog,
    picker: &mut dyn ProductPicker,
    user_id: Uuid,
) -> Result<RoutineOutcome, LifecycleError> {
    let profile = gateway
        .latest_profile(user_id)
        .await?
        .ok_or(LifecycleError::NoProfile(user_id))?;

    match gateway.latest_routine(user_id, profile.id).await {
        Ok(Some(routine)) => Ok(RoutineOutcome {
            profile,
            unavailable: missing_slots(&routine),
            routine,
            profile_persisted: true,
            routine_persisted: true,
            freshly_generated: false,
        }),
        Ok(None) => {
            info!("No routine yet for profile {}; generating", profile.id);
            Ok(generate_and_persist(gateway, catalog, picker, profile).await)
        }
        Err(e) => {
            warn!(
                "Failed to load routine for profile {}: {e}; generating a fresh one",
                profile.id
            );
            Ok(generate_and_persist(gateway, catalog, picker, profile).await)
        }
    }
}

/// New routine for the latest profile. Older routines are kept.
pub async fn regenerate_routine(
    gateway: &dyn PersistenceGateway,
    catalog: &Catalog,
    picker: &mut dyn ProductPicker,
    user_id: Uuid,
) -> Result<RoutineOutcome, LifecycleError> {
    let profile = gateway
        .latest_profile(user_id)
        .await?
        .ok_or(LifecycleError::NoProfile(user_id))?;

    Ok(generate_and_persist(gateway, catalog, picker, profile).await)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
