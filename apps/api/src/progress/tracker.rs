//! Daily routine checklist. One log per user per day; checking a step updates
//! that day's log, or creates it on first check.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::models::progress::{CompletedStep, ProgressLog};
use crate::models::routine::{parse_step_id, step_id, RoutinePhase, SkincareRoutine};
use crate::models::skin::ProductCategory;
use crate::persistence::{PersistenceError, PersistenceGateway};
use crate::recommendation::assembler::template;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    #[error("Invalid routine step id '{0}'")]
    InvalidStepId(String),

    #[error("Routine step '{0}' is not part of the routine template")]
    OutsideTemplate(String),

    #[error("Unknown product '{0}'")]
    UnknownProduct(String),

    #[error("Product '{product_id}' is not a {expected} for step '{step_id}'")]
    CategoryMismatch {
        step_id: String,
        product_id: String,
        expected: ProductCategory,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub step_id: String,
    pub phase: RoutinePhase,
    pub order: u32,
    pub product_id: String,
    pub product_name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub total: usize,
    pub completed: usize,
    pub items: Vec<ChecklistItem>,
}

/// Checks that `step_id` names a template slot and that `product_id` is a
/// catalog product of that slot's category.
pub fn validate_check_in(
    catalog: &Catalog,
    step_id: &str,
    product_id: &str,
) -> Result<(), CheckInError> {
    let (phase, order) =
        parse_step_id(step_id).ok_or_else(|| CheckInError::InvalidStepId(step_id.to_string()))?;
    let expected = usize::try_from(order - 1)
        .ok()
        .and_then(|i| template(phase).get(i).copied())
        .ok_or_else(|| CheckInError::OutsideTemplate(step_id.to_string()))?;
    let product = catalog
        .find(product_id)
        .ok_or_else(|| CheckInError::UnknownProduct(product_id.to_string()))?;

    if product.category != expected {
        return Err(CheckInError::CategoryMismatch {
            step_id: step_id.to_string(),
            product_id: product_id.to_string(),
            expected,
        });
    }
    Ok(())
}

/// Daily (morning + evening) steps of `routine` against the day's log.
pub fn checklist_summary(routine: &SkincareRoutine, log: Option<&ProgressLog>) -> ChecklistSummary {
    let is_checked = |id: &str| {
        log.map(|l| {
            l.completed_steps
                .iter()
                .any(|s| s.routine_step_id == id && s.completed)
        })
        .unwrap_or(false)
    };

    let items: Vec<ChecklistItem> = [RoutinePhase::Morning, RoutinePhase::Evening]
        .into_iter()
        .flat_map(|phase| {
            routine.steps(phase).iter().map(move |step| (phase, step))
        })
        .map(|(phase, step)| {
            let id = step_id(phase, step.order);
            ChecklistItem {
                completed: is_checked(&id),
                step_id: id,
                phase,
                order: step.order,
                product_id: step.product_id.clone(),
                product_name: step.product.name.clone(),
            }
        })
        .collect();

    ChecklistSummary {
        total: items.len(),
        completed: items.iter().filter(|i| i.completed).count(),
        items,
    }
}

/// Checks or unchecks one step in the user's log for `date`.
pub async fn mark_step(
    gateway: &dyn PersistenceGateway,
    user_id: Uuid,
    date: NaiveDate,
    step: CompletedStep,
) -> Result<ProgressLog, PersistenceError> {
    let log = gateway
        .upsert_progress_step(Uuid::new_v4(), user_id, date, &step)
        .await?;
    debug!(
        "Progress log {} for user {} on {}: {} ({})",
        log.id, user_id, date, step.routine_step_id, step.completed
    );
    Ok(log)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::models::skin::{Budget, SkinConcern, SkinType};
    use crate::persistence::test_support::FailingGateway;
    use crate::persistence::InMemoryGateway;
    use crate::recommendation::assembler::generate_routine;
    use crate::recommendation::test_support::FirstPicker;

    fn step(id: &str, completed: bool) -> CompletedStep {
        CompletedStep {
            routine_step_id: id.to_string(),
            completed,
            product_id: "c1".to_string(),
        }
    }

    #[test]
    fn test_check_in_accepts_matching_slot() {
        let catalog = Catalog::builtin();
        assert_eq!(validate_check_in(&catalog, "morning-1", "c1"), Ok(()));
        assert_eq!(validate_check_in(&catalog, "morning-5", "ss1"), Ok(()));
        assert_eq!(validate_check_in(&catalog, "evening-6", "ec1"), Ok(()));
        assert_eq!(validate_check_in(&catalog, "weekly-2", "ma1"), Ok(()));
    }

    #[test]
    fn test_check_in_rejects_steps_outside_template() {
        let catalog = Catalog::builtin();
        for id in ["morning-6", "morning-9", "evening-7", "weekly-3", "weekly-7"] {
            assert_eq!(
                validate_check_in(&catalog, id, "c1"),
                Err(CheckInError::OutsideTemplate(id.to_string()))
            );
        }
        assert!(matches!(
            validate_check_in(&catalog, "brunch-1", "c1"),
            Err(CheckInError::InvalidStepId(_))
        ));
    }

    #[test]
    fn test_check_in_rejects_wrong_product() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            validate_check_in(&catalog, "morning-5", "c1"),
            Err(CheckInError::CategoryMismatch { .. })
        ));
        assert!(matches!(
            validate_check_in(&catalog, "morning-1", "nope"),
            Err(CheckInError::UnknownProduct(_))
        ));
    }

    #[tokio::test]
    async fn test_checking_twice_same_day_updates_one_log() {
        let gateway = InMemoryGateway::new();
        let user = Uuid::new_v4();
        let today = Utc::now().date_naive();

        let first = mark_step(&gateway, user, today, step("morning-1", true))
            .await
            .unwrap();
        let second = mark_step(&gateway, user, today, step("morning-2", true))
            .await
            .unwrap();
        let third = mark_step(&gateway, user, today, step("morning-1", false))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.id, third.id);
        assert_eq!(third.completed_steps.len(), 2);
        assert!(!third.completed_steps[0].completed);
    }

    #[tokio::test]
    async fn test_new_day_starts_new_log() {
        let gateway = InMemoryGateway::new();
        let user = Uuid::new_v4();
        let day_one = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let day_two = day_one.succ_opt().unwrap();

        let a = mark_step(&gateway, user, day_one, step("morning-1", true))
            .await
            .unwrap();
        let b = mark_step(&gateway, user, day_two, step("morning-1", true))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_check_ins_share_one_log() {
        let gateway = Arc::new(InMemoryGateway::new());
        let user = Uuid::new_v4();
        let today = Utc::now().date_naive();

        let ids: Vec<String> = (1..=5)
            .map(|o| format!("morning-{o}"))
            .chain((1..=6).map(|o| format!("evening-{o}")))
            .collect();
        let tasks: Vec<_> = ids
            .iter()
            .map(|id| {
                let gateway = Arc::clone(&gateway);
                let check = step(id, true);
                tokio::spawn(async move { mark_step(gateway.as_ref(), user, today, check).await })
            })
            .collect();

        let mut log_ids = HashSet::new();
        for task in tasks {
            let log = task.await.unwrap().unwrap();
            log_ids.insert(log.id);
        }
        assert_eq!(log_ids.len(), 1);

        let stored = gateway
            .progress_log_for_date(user, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.completed_steps.len(), ids.len());
    }

    #[tokio::test]
    async fn test_mark_step_surfaces_store_failure() {
        let result = mark_step(
            &FailingGateway,
            Uuid::new_v4(),
            Utc::now().date_naive(),
            step("morning-1", true),
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_checklist_counts_daily_steps_only() {
        let catalog = Catalog::builtin();
        let routine = generate_routine(
            &catalog,
            &mut FirstPicker,
            Uuid::new_v4(),
            Uuid::new_v4(),
            SkinType::Combination,
            &[SkinConcern::Acne],
            Budget::High,
        )
        .routine;

        let log = ProgressLog {
            id: Uuid::new_v4(),
            user_id: routine.user_id,
            date: Utc::now().date_naive(),
            completed_steps: vec![
                step("morning-1", true),
                step("evening-6", true),
                step("morning-2", false),
                step("weekly-1", true),
            ],
            notes: None,
            photo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = checklist_summary(&routine, Some(&log));
        assert_eq!(summary.total, 11);
        assert_eq!(summary.completed, 2);
        assert!(summary.items.iter().all(|i| i.phase != RoutinePhase::Weekly));

        let empty = checklist_summary(&routine, None);
        assert_eq!(empty.completed, 0);
    }
}
