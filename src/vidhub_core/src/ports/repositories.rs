use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::{Account, NewAccount},
    account_id::AccountId,
    email::Email,
    full_name::FullName,
    password::Password,
    username::Username,
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::AccountAlreadyExists, Self::AccountAlreadyExists)
                | (Self::AccountNotFound, Self::AccountNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account, hashing its password. Fails with
    /// `AccountAlreadyExists` when the username or email is taken.
    async fn add_account(&self, account: NewAccount) -> Result<Account, AccountStoreError>;

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountStoreError>;

    /// Returns the first account whose username or email matches one of the
    /// supplied identifiers.
    async fn find_by_username_or_email(
        &self,
        username: Option<&Username>,
        email: Option<&Email>,
    ) -> Result<Account, AccountStoreError>;

    /// Compares `password` with the stored hash.
    async fn authenticate(
        &self,
        id: &AccountId,
        password: &Password,
    ) -> Result<(), AccountStoreError>;

    async fn set_new_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError>;

    async fn set_refresh_token(
        &self,
        id: &AccountId,
        refresh_token: Option<String>,
    ) -> Result<(), AccountStoreError>;

    async fn update_details(
        &self,
        id: &AccountId,
        full_name: FullName,
        email: Email,
    ) -> Result<Account, AccountStoreError>;

    async fn set_avatar_url(
        &self,
        id: &AccountId,
        avatar_url: String,
    ) -> Result<Account, AccountStoreError>;

    async fn set_cover_image_url(
        &self,
        id: &AccountId,
        cover_image_url: String,
    ) -> Result<Account, AccountStoreError>;
}
