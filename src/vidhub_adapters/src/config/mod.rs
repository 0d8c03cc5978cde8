pub mod constants;
pub mod settings;

use std::sync::OnceLock;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppEnvironment, ApplicationSettings, AuthSettings, MediaSettings,
    PostgresSettings, Settings, TokenSettings, UploadSettings,
};

static APP_ENVIRONMENT: OnceLock<AppEnvironment> = OnceLock::new();

/// Records the environment the service runs in. Only the first call wins.
pub fn init_app_environment(environment: AppEnvironment) {
    if APP_ENVIRONMENT.set(environment).is_err() {
        tracing::debug!("Application environment already initialized");
    }
}

/// Environment recorded by [`init_app_environment`], development by default.
pub fn app_environment() -> AppEnvironment {
    APP_ENVIRONMENT.get().copied().unwrap_or_default()
}
