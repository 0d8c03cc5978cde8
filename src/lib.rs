//! # Vidhub - Account Service Library
//!
//! Facade crate that re-exports the public APIs of the account service components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Account`, `Username`, `Email`, `Password`, etc.
//! - **Ports**: `AccountStore`, `MediaUploader`, `TokenIssuer`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshTokenUseCase`, etc.
//! - **Adapters**: `PostgresAccountStore`, `CloudinaryMediaUploader`, `JwtTokenIssuer`, etc.
//! - **Service**: `AccountService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use vidhub_core::*;
}

pub use vidhub_core::{
    Account, AccountId, AccountProfile, Email, FullName, NewAccount, Password, TokenPair,
    Username, ValidationError,
};

// ============================================================================
// Ports
// ============================================================================

/// Store and service traits the use cases depend on
pub mod ports {
    pub use vidhub_core::{
        AccountStore, AccountStoreError, MediaUploadError, MediaUploader, TokenError,
        TokenIssuer, UploadedMedia,
    };
}

pub use ports::{AccountStore, AccountStoreError, MediaUploader, TokenIssuer};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use vidhub_application::*;
}

pub use vidhub_application::{
    ChangePasswordUseCase, LoginUseCase, LogoutUseCase, RefreshTokenUseCase, RegisterUseCase,
    UpdateAccountDetailsUseCase, UpdateMediaUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP handlers, envelopes and shared state
    pub mod http {
        pub use vidhub_adapters::http::*;
    }

    /// Account store implementations
    pub mod persistence {
        pub use vidhub_adapters::persistence::*;
    }

    /// Media host client
    pub mod media {
        pub use vidhub_adapters::media::*;
    }

    /// Token signing and auth cookies
    pub mod auth {
        pub use vidhub_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use vidhub_adapters::config::*;
    }
}

pub use vidhub_adapters::{
    AppState, CloudinaryMediaUploader, CurrentAccount, HashMapAccountStore, JwtTokenIssuer,
    PostgresAccountStore,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use vidhub_service::{AccountService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the store and service traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
