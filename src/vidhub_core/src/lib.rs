pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, AccountProfile, NewAccount},
    account_id::AccountId,
    email::Email,
    full_name::FullName,
    password::Password,
    token_pair::TokenPair,
    username::Username,
    validation::ValidationError,
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::{MediaUploadError, MediaUploader, TokenError, TokenIssuer, UploadedMedia},
};
