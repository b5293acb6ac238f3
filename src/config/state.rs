// Application state module
// Owns the activity store alongside the loaded configuration

use super::types::Config;
use crate::store::{self, ActivityStore, SeedError};

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    pub store: ActivityStore,
}

impl AppState {
    /// Build state with the store seeded from `config.activities.seed_file`
    pub fn new(config: &Config) -> Result<Self, SeedError> {
        let activities = store::load_seed(config.activities.seed_file.as_deref())?;
        Ok(Self::with_store(config, ActivityStore::new(activities)))
    }

    /// Build state around an existing store
    pub fn with_store(config: &Config, store: ActivityStore) -> Self {
        Self {
            config: config.clone(),
            store,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_uses_configured_seed_file() {
        let dir = std::env::temp_dir().join(format!("activities-seed-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("activities.toml");
        std::fs::write(
            &path,
            r#"
            [activities."Yoga"]
            description = "Stretching and breathing"
            schedule = "Tuesdays, 7:00 AM - 8:00 AM"
            max_participants = 10
            participants = ["lena@mergington.edu"]
            "#,
        )
        .unwrap();

        let mut config = Config::defaults().unwrap();
        config.activities.seed_file = Some(path.to_string_lossy().into_owned());
        let state = AppState::new(&config).unwrap();

        let listing = state.store.list().await;
        assert_eq!(listing.keys().collect::<Vec<_>>(), vec!["Yoga"]);
        assert_eq!(listing["Yoga"].participants, vec!["lena@mergington.edu"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_new_without_seed_file_uses_builtin_activities() {
        let config = Config::defaults().unwrap();
        let state = AppState::new(&config).unwrap();
        assert!(state.store.get("Chess Club").await.is_ok());
        assert!(state.access_log_enabled());
    }

    #[test]
    fn test_new_rejects_missing_seed_file() {
        let mut config = Config::defaults().unwrap();
        config.activities.seed_file = Some("/nonexistent/activities.toml".to_string());
        assert!(matches!(AppState::new(&config), Err(SeedError::Io { .. })));
    }
}
