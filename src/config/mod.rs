// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    ActivitiesConfig, Config, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    RoutesConfig, ServerConfig,
};

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "ACTIVITIES";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources in increasing priority: built-in defaults, the config file (optional),
    /// then `ACTIVITIES__SECTION__KEY` environment variables.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::build(Some(config_path), Some(env_source()))
    }

    /// Built-in defaults only, ignoring any config file and the environment
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::build(None, None)
    }

    fn build(
        config_path: Option<&str>,
        env: Option<config::Environment>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "activities-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)?; // 1MB

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        builder.build()?.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let cfg = Config::defaults().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.routes.root_redirect, "/static/index.html");
        assert_eq!(cfg.routes.static_mount, "/static");
        assert!(cfg.routes.health.enabled);
        assert!(cfg.activities.seed_file.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::defaults().unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = std::env::temp_dir().join(format!("activities-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 9100

            [routes]
            static_dir = "public"

            [activities]
            seed_file = "seed.toml"
            "#,
        )
        .unwrap();

        let cfg = Config::build(path.to_str(), None).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.routes.static_dir, "public");
        assert_eq!(cfg.routes.static_mount, "/static");
        assert_eq!(cfg.activities.seed_file.as_deref(), Some("seed.toml"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_env_overrides_config_file() {
        let dir = std::env::temp_dir().join(format!("activities-env-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
            [server]
            port = 9100

            [http]
            server_name = "from-file"
            "#,
        )
        .unwrap();

        let mut vars = config::Map::new();
        vars.insert("ACTIVITIES__SERVER__PORT".to_string(), "9123".to_string());
        vars.insert("ACTIVITIES__HTTP__ENABLE_CORS".to_string(), "true".to_string());
        vars.insert("OTHER__SERVER__PORT".to_string(), "1".to_string());
        let env = env_source().source(Some(vars));

        let cfg = Config::build(path.to_str(), Some(env)).unwrap();
        assert_eq!(cfg.server.port, 9123);
        assert!(cfg.http.enable_cors);
        // Keys without an override keep the file value
        assert_eq!(cfg.http.server_name, "from-file");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
