pub mod auth;
pub mod config;
pub mod http;
pub mod media;
pub mod persistence;

pub use auth::{CurrentAccount, JwtTokenIssuer};
pub use http::{AppState, routes::ApiError};
pub use media::CloudinaryMediaUploader;
pub use persistence::{HashMapAccountStore, PostgresAccountStore};
