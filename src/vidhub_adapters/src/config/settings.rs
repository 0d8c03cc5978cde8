use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{defaults, env};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub media: MediaSettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: AppEnvironment,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl AppEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
        }
    }
}

impl TryFrom<String> for AppEnvironment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "development" | "local" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            other => Err(format!(
                "{other} is not a supported environment, use either `development` or `production`"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub access_token: TokenSettings,
    pub refresh_token: TokenSettings,
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSettings {
    pub secret: Secret<String>,
    pub ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret<String>,
    pub folder: Option<String>,
    pub timeout_in_millis: u64,
}

impl MediaSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub temp_dir: PathBuf,
    /// Request body limit for the multipart routes.
    pub max_file_bytes: usize,
}

impl Settings {
    /// Loads settings from defaults, `config/{base,<environment>}.json`,
    /// `VIDHUB__SECTION__KEY` variables and the well-known secret variables.
    pub fn build() -> Result<Self, ConfigError> {
        let environment: AppEnvironment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| AppEnvironment::Development.as_str().to_owned())
            .try_into()
            .map_err(ConfigError::Message)?;

        let config_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(e.to_string()))?
            .join("config");

        let allowed_origins = std::env::var(env::CORS_ORIGIN_ENV_VAR).ok().map(|origins| {
            origins
                .split(',')
                .map(|origin| origin.trim().to_owned())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        });

        Self::builder(environment)?
            .add_source(File::from(config_dir.join("base")).required(false))
            .add_source(File::from(config_dir.join(environment.as_str())).required(false))
            .add_source(
                Environment::with_prefix(env::SETTINGS_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_origins"),
            )
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "auth.access_token.secret",
                std::env::var(env::ACCESS_TOKEN_SECRET_ENV_VAR).ok(),
            )?
            .set_override_option(
                "auth.refresh_token.secret",
                std::env::var(env::REFRESH_TOKEN_SECRET_ENV_VAR).ok(),
            )?
            .set_override_option(
                "media.cloud_name",
                std::env::var(env::CLOUDINARY_CLOUD_NAME_ENV_VAR).ok(),
            )?
            .set_override_option(
                "media.api_key",
                std::env::var(env::CLOUDINARY_API_KEY_ENV_VAR).ok(),
            )?
            .set_override_option(
                "media.api_secret",
                std::env::var(env::CLOUDINARY_API_SECRET_ENV_VAR).ok(),
            )?
            .set_override_option("auth.allowed_origins", allowed_origins)?
            .build()?
            .try_deserialize()
    }

    /// Builder preloaded with every default, before any source is added.
    pub fn builder(
        environment: AppEnvironment,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.host", defaults::HOST)?
            .set_default("application.port", i64::from(defaults::PORT))?
            .set_default("application.environment", environment.as_str())?
            .set_default(
                "postgres.max_connections",
                i64::from(defaults::POSTGRES_MAX_CONNECTIONS),
            )?
            .set_default(
                "auth.access_token.ttl_in_seconds",
                defaults::ACCESS_TOKEN_TTL_SECONDS,
            )?
            .set_default(
                "auth.refresh_token.ttl_in_seconds",
                defaults::REFRESH_TOKEN_TTL_SECONDS,
            )?
            .set_default("auth.allowed_origins", Vec::<String>::new())?
            .set_default("media.base_url", defaults::MEDIA_BASE_URL)?
            .set_default(
                "media.timeout_in_millis",
                defaults::MEDIA_TIMEOUT_MILLIS as i64,
            )?
            .set_default("uploads.temp_dir", defaults::UPLOAD_TEMP_DIR)?
            .set_default(
                "uploads.max_file_bytes",
                defaults::UPLOAD_MAX_FILE_BYTES as i64,
            )
    }
}
