//! Activity store module
//!
//! Holds every activity and its participant list for the lifetime of the process.
//! The store lives inside `AppState` and is handed to request handlers explicitly.

mod seed;

pub use seed::{load_seed, parse_seed, SeedError, DEFAULT_SEED};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// A single activity record, keyed by name in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    /// Advertised capacity, not enforced on sign-up
    pub max_participants: u32,
    /// Participant emails in sign-up order
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}

/// Store operation failures
///
/// The `Display` text is returned to clients as the error detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Activity not found")]
    ActivityNotFound,

    #[error("Student is already signed up")]
    AlreadySignedUp,

    #[error("Student is not signed up for this activity")]
    NotSignedUp,
}

/// In-memory activity store
///
/// Each mutation holds the write lock across its check and its update,
/// so concurrent sign-ups for the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct ActivityStore {
    activities: RwLock<BTreeMap<String, Activity>>,
}

impl ActivityStore {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        Self {
            activities: RwLock::new(activities),
        }
    }

    /// Snapshot of every activity, keyed by name
    pub async fn list(&self) -> BTreeMap<String, Activity> {
        self.activities.read().await.clone()
    }

    pub async fn get(&self, name: &str) -> Result<Activity, StoreError> {
        self.activities
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or(StoreError::ActivityNotFound)
    }

    pub async fn len(&self) -> usize {
        self.activities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.activities.read().await.is_empty()
    }

    /// Append `email` to the activity's participants
    pub async fn add_participant(&self, name: &str, email: &str) -> Result<(), StoreError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or(StoreError::ActivityNotFound)?;

        if activity.has_participant(email) {
            return Err(StoreError::AlreadySignedUp);
        }

        activity.participants.push(email.to_string());
        Ok(())
    }

    /// Remove `email` from the activity's participants, keeping the order of the rest
    pub async fn remove_participant(&self, name: &str, email: &str) -> Result<(), StoreError> {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or(StoreError::ActivityNotFound)?;

        let position = activity
            .participants
            .iter()
            .position(|p| p == email)
            .ok_or(StoreError::NotSignedUp)?;

        activity.participants.remove(position);
        Ok(())
    }
}
