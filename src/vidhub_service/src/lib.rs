mod account_service;
mod helpers;
pub mod tracing;

pub use account_service::AccountService;
pub use helpers::{configure_postgresql, get_postgres_pool};

// Re-export commonly used types
pub use vidhub_core::{AccountStore, MediaUploader};
