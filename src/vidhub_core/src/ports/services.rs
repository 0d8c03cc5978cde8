use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{account::Account, account_id::AccountId};

/// Result of a successful upload to the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum MediaUploadError {
    #[error("Failed to read local file: {0}")]
    LocalFile(String),
    #[error("Media host request failed: {0}")]
    Request(String),
    #[error("Media host returned no usable url")]
    MissingUrl,
}

/// Port trait for the third-party media host.
///
/// Implementations remove the local file once the upload attempt is over,
/// whatever its outcome.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, local_path: &Path) -> Result<UploadedMedia, MediaUploadError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(String),
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Port trait for signing and verifying the access/refresh token pair.
pub trait TokenIssuer: Send + Sync {
    fn issue_access_token(&self, account: &Account) -> Result<String, TokenError>;
    fn issue_refresh_token(&self, account: &Account) -> Result<String, TokenError>;
    fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError>;
    fn verify_refresh_token(&self, token: &str) -> Result<AccountId, TokenError>;
}
