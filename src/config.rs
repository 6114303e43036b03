use serde::{Deserialize, Serialize};
use std::env;
use tower_sessions::cookie::SameSite;

// Environment variable that selects the profile. FLASK_ENV is still honoured
// because the existing deployment scripts export it.
pub const ENV_INDICATOR: &str = "APP_ENV";
pub const LEGACY_ENV_INDICATOR: &str = "FLASK_ENV";

pub const DEFAULT_PORT: u16 = 8080;
pub const SESSION_LIFETIME_SECS: u64 = 3600; // 1 hour
pub const MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024; // 16MB in bytes
pub const CSV_HEADERS: [&str; 5] = ["username", "email", "password", "role", "created"];

const PLACEHOLDER_SECRET: &str = "this-should-be-changed-in-production";

/// Named configuration profiles. Unknown or missing names resolve to `Development`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Development,
    Testing,
    Production,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub profile: Profile,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub session: SessionConfig,
    pub upload: UploadConfig,
    pub storage: StorageConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub testing: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SecurityConfig {
    pub secret_key: String,
    pub csrf_enabled: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    pub session_type: String,
    pub lifetime_secs: u64,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    pub same_site: CookieSameSite,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CookieSameSite {
    Strict,
    Lax,
    None,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_content_length: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub csv_file_path: String,
    pub csv_headers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssetsConfig {
    pub index: String,
    pub src_dir: String,
    pub static_dir: String,
}

impl Profile {
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("testing") => Profile::Testing,
            Some("production") => Profile::Production,
            _ => Profile::Development,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Testing => "testing",
            Profile::Production => "production",
        }
    }

    /// Settings fixed by this profile, before any file or environment overrides.
    pub fn settings(self) -> Config {
        let mut config = Config::base(self);
        match self {
            Profile::Development => {
                config.server.debug = true;
            }
            Profile::Testing => {
                config.server.debug = true;
                config.server.testing = true;
                config.security.csrf_enabled = false;
                // Tests must never touch the real roster
                config.storage.csv_file_path = "data/test_users.csv".into();
            }
            Profile::Production => {
                config.session.cookie_secure = true;
            }
        }
        config
    }
}

impl From<CookieSameSite> for SameSite {
    fn from(value: CookieSameSite) -> Self {
        match value {
            CookieSameSite::Strict => SameSite::Strict,
            CookieSameSite::Lax => SameSite::Lax,
            CookieSameSite::None => SameSite::None,
        }
    }
}

impl Config {
    fn base(profile: Profile) -> Self {
        Self {
            profile,
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: DEFAULT_PORT,
                debug: false,
                testing: false,
            },
            security: SecurityConfig {
                secret_key: PLACEHOLDER_SECRET.into(),
                csrf_enabled: true,
            },
            session: SessionConfig {
                session_type: "filesystem".into(),
                lifetime_secs: SESSION_LIFETIME_SECS,
                cookie_secure: false,
                cookie_http_only: true,
                same_site: CookieSameSite::Lax,
            },
            upload: UploadConfig {
                max_content_length: MAX_CONTENT_LENGTH,
            },
            storage: StorageConfig {
                csv_file_path: "data/users.csv".into(),
                csv_headers: CSV_HEADERS.iter().map(|h| h.to_string()).collect(),
            },
            assets: AssetsConfig {
                index: "public/index.html".into(),
                src_dir: "public/src".into(),
                static_dir: "public/static".into(),
            },
        }
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        let name = env::var(ENV_INDICATOR)
            .or_else(|_| env::var(LEGACY_ENV_INDICATOR))
            .ok();
        let profile = Profile::from_name(name.as_deref());

        let mut defaults = profile.settings();
        if profile == Profile::Production {
            defaults.apply_production_env(|key| env::var(key).ok());
        }

        let mut config = Self::layered(defaults)?;
        if let Ok(port) = env::var("PORT") {
            config.server.port = parse_port(&port)?;
        }
        Ok(config)
    }

    // Profile defaults < config/<profile> file < APP_* environment variables
    fn layered(defaults: Config) -> Result<Self, config::ConfigError> {
        let file = format!("config/{}", defaults.profile.name());
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Production reads its secret and storage path from the process environment.
    pub fn apply_production_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("SECRET_KEY").filter(|s| !s.is_empty()) {
            self.security.secret_key = secret;
        }
        if let Some(path) = lookup("CSV_FILE_PATH").filter(|p| !p.is_empty()) {
            self.storage.csv_file_path = path;
        }
    }

    pub fn uses_placeholder_secret(&self) -> bool {
        self.security.secret_key == PLACEHOLDER_SECRET
    }
}

fn parse_port(raw: &str) -> Result<u16, config::ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| config::ConfigError::Message(format!("invalid PORT value: {:?}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_or_missing_env_falls_back_to_development() {
        assert_eq!(Profile::from_name(None), Profile::Development);
        assert_eq!(Profile::from_name(Some("")), Profile::Development);
        assert_eq!(Profile::from_name(Some("default")), Profile::Development);
        assert_eq!(Profile::from_name(Some("staging")), Profile::Development);
    }

    #[test]
    fn test_known_names_select_their_profile() {
        assert_eq!(Profile::from_name(Some("development")), Profile::Development);
        assert_eq!(Profile::from_name(Some("testing")), Profile::Testing);
        assert_eq!(Profile::from_name(Some(" Production ")), Profile::Production);
    }

    #[test]
    fn test_development_profile_settings() {
        let config = Profile::Development.settings();
        assert!(config.server.debug);
        assert!(!config.server.testing);
        assert!(config.security.csrf_enabled);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.session.lifetime_secs, 3600);
        assert_eq!(config.upload.max_content_length, 16 * 1024 * 1024);
        assert_eq!(config.storage.csv_file_path, "data/users.csv");
        assert_eq!(config.storage.csv_headers, CSV_HEADERS);
        assert_eq!(config.session.same_site, CookieSameSite::Lax);
    }

    #[test]
    fn test_testing_profile_uses_separate_file_and_disables_csrf() {
        let testing = Profile::Testing.settings();
        let development = Profile::Development.settings();
        assert_ne!(testing.storage.csv_file_path, development.storage.csv_file_path);
        assert_eq!(testing.storage.csv_file_path, "data/test_users.csv");
        assert!(!testing.security.csrf_enabled);
        assert!(testing.server.testing);
        assert!(testing.server.debug);
    }

    #[test]
    fn test_production_profile_disables_debug() {
        let config = Profile::Production.settings();
        assert!(!config.server.debug);
        assert!(config.security.csrf_enabled);
        assert!(config.session.cookie_secure);
        assert!(config.uses_placeholder_secret());
    }

    #[test]
    fn test_production_env_overrides() {
        let mut config = Profile::Production.settings();
        config.apply_production_env(|key| match key {
            "SECRET_KEY" => Some("s3cret".to_string()),
            "CSV_FILE_PATH" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.security.secret_key, "s3cret");
        // An empty path keeps the default
        assert_eq!(config.storage.csv_file_path, "data/users.csv");
        assert!(!config.uses_placeholder_secret());
    }

    #[test]
    fn test_layered_config_keeps_profile_defaults() {
        let config = Config::layered(Profile::Testing.settings()).unwrap();
        assert_eq!(config.profile, Profile::Testing);
        assert_eq!(config.storage.csv_headers, CSV_HEADERS);
        assert_eq!(config.upload.max_content_length, MAX_CONTENT_LENGTH);
        assert!(!config.security.csrf_enabled);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("9000").unwrap(), 9000);
        assert!(parse_port("not-a-port").is_err());
        assert!(parse_port("70000").is_err());
    }
}
