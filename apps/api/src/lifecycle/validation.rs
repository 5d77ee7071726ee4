use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::skin::{Budget, SkinConcern, SkinType};

const MAX_ALLERGY_LEN: usize = 100;
const MAX_ALLERGIES: usize = 50;

/// Raw quiz answers as submitted by the form.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmission {
    pub user_id: Uuid,
    pub skin_type: SkinType,
    pub skin_concerns: Vec<SkinConcern>,
    #[serde(default)]
    pub allergies: Vec<String>,
    pub budget: Budget,
}

/// Quiz answers that passed validation and normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidQuiz {
    pub user_id: Uuid,
    pub skin_type: SkinType,
    pub skin_concerns: Vec<SkinConcern>,
    pub allergies: Vec<String>,
    pub budget: Budget,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizValidationError {
    #[error("Please select at least one skin concern")]
    NoConcerns,

    #[error("Allergy entry exceeds {MAX_ALLERGY_LEN} characters")]
    AllergyTooLong,

    #[error("At most {MAX_ALLERGIES} allergies may be listed")]
    TooManyAllergies,
}

/// Validates a submission.
///
/// - concerns: at least one; duplicates collapse, first occurrence wins
/// - allergies: trimmed, blanks dropped, case-insensitive duplicates removed
pub fn validate_quiz(submission: QuizSubmission) -> Result<ValidQuiz, QuizValidationError> {
    let mut seen_concerns = HashSet::new();
    let skin_concerns: Vec<SkinConcern> = submission
        .skin_concerns
        .into_iter()
        .filter(|c| seen_concerns.insert(*c))
        .collect();
    if skin_concerns.is_empty() {
        return Err(QuizValidationError::NoConcerns);
    }

    let mut seen_allergies = HashSet::new();
    let mut allergies = Vec::new();
    for raw in submission.allergies {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().count() > MAX_ALLERGY_LEN {
            return Err(QuizValidationError::AllergyTooLong);
        }
        if seen_allergies.insert(trimmed.to_lowercase()) {
            allergies.push(trimmed.to_string());
        }
    }
    if allergies.len() > MAX_ALLERGIES {
        return Err(QuizValidationError::TooManyAllergies);
    }

    Ok(ValidQuiz {
        user_id: submission.user_id,
        skin_type: submission.skin_type,
        skin_concerns,
        allergies,
        budget: submission.budget,
    })
}
