// Seed loading module
// Parses and validates the TOML document the store starts from

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

use super::Activity;

/// Activities compiled into the binary, used when no seed file is configured
pub const DEFAULT_SEED: &str = include_str!("default_activities.toml");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read seed file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed document: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Activity name must not be empty")]
    EmptyName,

    #[error("Activity '{activity}' has an empty participant email")]
    EmptyEmail { activity: String },

    #[error("Activity '{activity}' lists '{email}' more than once")]
    DuplicateParticipant { activity: String, email: String },
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    activities: BTreeMap<String, Activity>,
}

/// Load the seed from `path`, or the built-in seed when `path` is `None`
pub fn load_seed(path: Option<&str>) -> Result<BTreeMap<String, Activity>, SeedError> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(Path::new(p)).map_err(|source| SeedError::Io {
                path: p.to_string(),
                source,
            })?;
            parse_seed(&content)
        }
        None => parse_seed(DEFAULT_SEED),
    }
}

/// Parse a seed document and check the per-activity invariants
///
/// TOML rejects duplicate table keys, so activity names are already unique here.
pub fn parse_seed(content: &str) -> Result<BTreeMap<String, Activity>, SeedError> {
    let document: SeedDocument = toml::from_str(content)?;

    for (name, activity) in &document.activities {
        validate_activity(name, activity)?;
    }

    Ok(document.activities)
}

fn validate_activity(name: &str, activity: &Activity) -> Result<(), SeedError> {
    if name.trim().is_empty() {
        return Err(SeedError::EmptyName);
    }

    let mut seen = HashSet::new();
    for email in &activity.participants {
        if email.trim().is_empty() {
            return Err(SeedError::EmptyEmail {
                activity: name.to_string(),
            });
        }
        if !seen.insert(email.as_str()) {
            return Err(SeedError::DuplicateParticipant {
                activity: name.to_string(),
                email: email.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_valid() {
        let activities = parse_seed(DEFAULT_SEED).unwrap();
        assert!(activities.contains_key("Chess Club"));
        assert!(activities.contains_key("Programming Class"));
        assert!(activities.contains_key("Gym Class"));
        assert!(activities.contains_key("Music Band"));
        assert!(!activities["Programming Class"].participants.is_empty());
        assert!(!activities["Gym Class"].participants.is_empty());
    }

    #[test]
    fn test_load_seed_without_path_uses_default() {
        let activities = load_seed(None).unwrap();
        assert_eq!(activities, parse_seed(DEFAULT_SEED).unwrap());
    }

    #[test]
    fn test_missing_participants_default_to_empty() {
        let activities = parse_seed(
            r#"
            [activities."Chess Club"]
            description = "Chess"
            schedule = "Fridays"
            max_participants = 12
            "#,
        )
        .unwrap();
        assert!(activities["Chess Club"].participants.is_empty());
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let err = parse_seed(
            r#"
            [activities."Chess Club"]
            description = "Chess"
            schedule = "Fridays"
            max_participants = 12
            participants = ["a@mergington.edu", "a@mergington.edu"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::DuplicateParticipant { .. }));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = parse_seed(
            r#"
            [activities."  "]
            description = "Nothing"
            schedule = "Never"
            max_participants = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::EmptyName));
    }

    #[test]
    fn test_blank_email_rejected() {
        let err = parse_seed(
            r#"
            [activities."Chess Club"]
            description = "Chess"
            schedule = "Fridays"
            max_participants = 12
            participants = [""]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::EmptyEmail { .. }));
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = parse_seed(
            r#"
            [activities."Chess Club"]
            description = "Chess"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_seed(Some("/nonexistent/activities.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/activities.toml"));
    }
}
