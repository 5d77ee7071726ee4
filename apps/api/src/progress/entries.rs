//! Progress journal: free-text notes and a progress photo link on the day's log.
//! Photos are stored elsewhere; only their URL is kept here.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::models::progress::ProgressLog;
use crate::persistence::{PersistenceError, PersistenceGateway};

pub const MAX_NOTES_LEN: usize = 2000;
const MAX_PHOTO_URL_LEN: usize = 2048;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressEntryInput {
    pub user_id: Uuid,
    /// Defaults to today (UTC).
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryValidationError {
    #[error("Provide notes or a photo URL")]
    Empty,

    #[error("Notes exceed {MAX_NOTES_LEN} characters")]
    NotesTooLong,

    #[error("Photo URL exceeds {MAX_PHOTO_URL_LEN} characters")]
    PhotoUrlTooLong,

    #[error("Photo URL must be an absolute http(s) URL: {0}")]
    InvalidPhotoUrl(String),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims both fields, drops blanks, and requires at least one to remain.
pub fn validate_entry(input: ProgressEntryInput) -> Result<ProgressEntry, EntryValidationError> {
    let notes = non_blank(input.notes);
    if notes
        .as_ref()
        .is_some_and(|n| n.chars().count() > MAX_NOTES_LEN)
    {
        return Err(EntryValidationError::NotesTooLong);
    }

    let photo_url = non_blank(input.photo_url);
    if let Some(raw) = &photo_url {
        if raw.len() > MAX_PHOTO_URL_LEN {
            return Err(EntryValidationError::PhotoUrlTooLong);
        }
        let parsed =
            Url::parse(raw).map_err(|e| EntryValidationError::InvalidPhotoUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EntryValidationError::InvalidPhotoUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
    }

    if notes.is_none() && photo_url.is_none() {
        return Err(EntryValidationError::Empty);
    }

    Ok(ProgressEntry {
        user_id: input.user_id,
        date: input.date.unwrap_or_else(|| Utc::now().date_naive()),
        notes,
        photo_url,
    })
}

pub async fn save_entry(
    gateway: &dyn PersistenceGateway,
    entry: &ProgressEntry,
) -> Result<ProgressLog, PersistenceError> {
    let log = gateway
        .upsert_progress_entry(
            Uuid::new_v4(),
            entry.user_id,
            entry.date,
            entry.notes.as_deref(),
            entry.photo_url.as_deref(),
        )
        .await?;
    info!(
        "Saved progress entry on log {} for user {} ({})",
        log.id, entry.user_id, entry.date
    );
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(notes: Option<&str>, photo_url: Option<&str>) -> ProgressEntryInput {
        ProgressEntryInput {
            user_id: Uuid::new_v4(),
            date: None,
            notes: notes.map(String::from),
            photo_url: photo_url.map(String::from),
        }
    }

    #[test]
    fn test_blank_entry_rejected() {
        let err = validate_entry(input(Some("   "), Some(""))).unwrap_err();
        assert_eq!(err, EntryValidationError::Empty);
    }

    #[test]
    fn test_fields_trimmed() {
        let entry = validate_entry(input(
            Some("  less redness today "),
            Some(" https://cdn.example.com/u/1.jpg "),
        ))
        .unwrap();
        assert_eq!(entry.notes.as_deref(), Some("less redness today"));
        assert_eq!(entry.photo_url.as_deref(), Some("https://cdn.example.com/u/1.jpg"));
        assert_eq!(entry.date, Utc::now().date_naive());
    }

    #[test]
    fn test_bad_photo_urls_rejected() {
        for url in ["not a url", "/relative/path.jpg", "ftp://files.example.com/p.jpg"] {
            assert!(matches!(
                validate_entry(input(None, Some(url))),
                Err(EntryValidationError::InvalidPhotoUrl(_))
            ));
        }
        let long = format!("https://example.com/{}", "a".repeat(MAX_PHOTO_URL_LEN));
        assert_eq!(
            validate_entry(input(None, Some(&long))).unwrap_err(),
            EntryValidationError::PhotoUrlTooLong
        );
    }

    #[test]
    fn test_overlong_notes_rejected() {
        let notes = "n".repeat(MAX_NOTES_LEN + 1);
        assert_eq!(
            validate_entry(input(Some(&notes), None)).unwrap_err(),
            EntryValidationError::NotesTooLong
        );
    }
}
