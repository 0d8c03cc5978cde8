use std::path::PathBuf;

use vidhub_core::{
    Account, AccountStore, AccountStoreError, Email, FullName, MediaUploadError, MediaUploader,
    NewAccount, Password, Username,
};

use super::update_media::upload_media;

/// Validated registration input. Files are local paths of staged uploads.
#[derive(Debug)]
pub struct RegisterCommand {
    pub full_name: FullName,
    pub username: Username,
    pub email: Email,
    pub password: Password,
    pub avatar: Option<PathBuf>,
    pub cover_image: Option<PathBuf>,
}

/// Error types for register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Account with this username or email already exists")]
    AccountAlreadyExists,
    #[error("Avatar file is required")]
    AvatarRequired,
    #[error("Avatar upload failed: {0}")]
    AvatarUploadFailed(MediaUploadError),
    #[error("Something went wrong while registering the account")]
    AccountNotPersisted,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

impl From<AccountStoreError> for RegisterError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountAlreadyExists => RegisterError::AccountAlreadyExists,
            other => RegisterError::AccountStoreError(other),
        }
    }
}

/// Register use case - creates an account once its avatar is hosted
pub struct RegisterUseCase<'a, S, M>
where
    S: AccountStore,
    M: MediaUploader,
{
    account_store: &'a S,
    media_uploader: &'a M,
}

impl<'a, S, M> RegisterUseCase<'a, S, M>
where
    S: AccountStore,
    M: MediaUploader,
{
    pub fn new(account_store: &'a S, media_uploader: &'a M) -> Self {
        Self {
            account_store,
            media_uploader,
        }
    }

    /// Execute the register use case
    ///
    /// # Returns
    /// The account as re-read from the store after creation.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all, fields(username = %command.username))]
    pub async fn execute(&self, command: RegisterCommand) -> Result<Account, RegisterError> {
        match self
            .account_store
            .find_by_username_or_email(Some(&command.username), Some(&command.email))
            .await
        {
            Ok(_) => return Err(RegisterError::AccountAlreadyExists),
            Err(AccountStoreError::AccountNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let avatar_path = command.avatar.ok_or(RegisterError::AvatarRequired)?;
        let avatar = upload_media(self.media_uploader, &avatar_path)
            .await
            .map_err(RegisterError::AvatarUploadFailed)?;

        let cover_image_url = match command.cover_image {
            Some(path) => match upload_media(self.media_uploader, &path).await {
                Ok(cover_image) => Some(cover_image.url),
                Err(e) => {
                    tracing::warn!(error = %e, "Cover image upload failed, registering without it");
                    None
                }
            },
            None => None,
        };

        let created = self
            .account_store
            .add_account(NewAccount {
                username: command.username,
                email: command.email,
                full_name: command.full_name,
                password: command.password,
                avatar_url: avatar.url,
                cover_image_url,
            })
            .await?;

        self.account_store
            .get_account(&created.id)
            .await
            .map_err(|e| match e {
                AccountStoreError::AccountNotFound => RegisterError::AccountNotPersisted,
                other => other.into(),
            })
    }
}
