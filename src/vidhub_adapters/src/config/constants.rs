pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const SETTINGS_PREFIX: &str = "VIDHUB";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const ACCESS_TOKEN_SECRET_ENV_VAR: &str = "ACCESS_TOKEN_SECRET";
    pub const REFRESH_TOKEN_SECRET_ENV_VAR: &str = "REFRESH_TOKEN_SECRET";
    pub const CLOUDINARY_CLOUD_NAME_ENV_VAR: &str = "CLOUDINARY_CLOUD_NAME";
    pub const CLOUDINARY_API_KEY_ENV_VAR: &str = "CLOUDINARY_API_KEY";
    pub const CLOUDINARY_API_SECRET_ENV_VAR: &str = "CLOUDINARY_API_SECRET";
    pub const CORS_ORIGIN_ENV_VAR: &str = "CORS_ORIGIN";
}

pub const ACCESS_TOKEN_COOKIE_NAME: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE_NAME: &str = "refreshToken";

pub const API_PREFIX: &str = "/api/v1/users";

pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8000;
    pub const POSTGRES_MAX_CONNECTIONS: u32 = 5;
    /// One day.
    pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;
    /// Ten days.
    pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 10;
    pub const MEDIA_BASE_URL: &str = "https://api.cloudinary.com/";
    pub const MEDIA_TIMEOUT_MILLIS: u64 = 30_000;
    pub const UPLOAD_TEMP_DIR: &str = "./public/temp";
    /// 100 MiB.
    pub const UPLOAD_MAX_FILE_BYTES: usize = 100 * 1024 * 1024;
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const ACCESS_TOKEN_SECRET: &str = "test-access-secret";
    pub const REFRESH_TOKEN_SECRET: &str = "test-refresh-secret";
    pub const UPLOAD_MAX_FILE_BYTES: usize = 8 * 1024 * 1024;
    pub mod media {
        use std::time::Duration;

        pub const CLOUD_NAME: &str = "test-cloud";
        pub const API_KEY: &str = "test-key";
        pub const API_SECRET: &str = "test-secret";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(500);
    }
}
