use std::path::{Path, PathBuf};

use vidhub_core::{
    Account, AccountId, AccountStore, AccountStoreError, MediaUploadError, MediaUploader,
    UploadedMedia,
};

/// Which image of the account an upload replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Avatar,
    CoverImage,
}

impl MediaSlot {
    pub fn label(&self) -> &'static str {
        match self {
            MediaSlot::Avatar => "Avatar",
            MediaSlot::CoverImage => "Cover image",
        }
    }

    /// Multipart field carrying the file for this slot.
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaSlot::Avatar => "avatar",
            MediaSlot::CoverImage => "coverImage",
        }
    }
}

/// Error types for avatar and cover image updates
#[derive(Debug, thiserror::Error)]
pub enum UpdateMediaError {
    #[error("{} file is missing", .0.label())]
    FileMissing(MediaSlot),
    #[error("Error while uploading {}: {}", .0.label().to_lowercase(), .1)]
    UploadFailed(MediaSlot, MediaUploadError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Replaces the avatar or cover image of an authenticated account
pub struct UpdateMediaUseCase<'a, S, M>
where
    S: AccountStore,
    M: MediaUploader,
{
    account_store: &'a S,
    media_uploader: &'a M,
    slot: MediaSlot,
}

impl<'a, S, M> UpdateMediaUseCase<'a, S, M>
where
    S: AccountStore,
    M: MediaUploader,
{
    pub fn new(account_store: &'a S, media_uploader: &'a M, slot: MediaSlot) -> Self {
        Self {
            account_store,
            media_uploader,
            slot,
        }
    }

    #[tracing::instrument(name = "UpdateMediaUseCase::execute", skip(self), fields(slot = ?self.slot))]
    pub async fn execute(
        &self,
        id: &AccountId,
        file: Option<PathBuf>,
    ) -> Result<Account, UpdateMediaError> {
        let path = file.ok_or(UpdateMediaError::FileMissing(self.slot))?;

        let media = upload_media(self.media_uploader, &path)
            .await
            .map_err(|e| UpdateMediaError::UploadFailed(self.slot, e))?;

        let account = match self.slot {
            MediaSlot::Avatar => self.account_store.set_avatar_url(id, media.url).await?,
            MediaSlot::CoverImage => {
                self.account_store
                    .set_cover_image_url(id, media.url)
                    .await?
            }
        };

        Ok(account)
    }
}

/// Uploads a staged file, rejecting answers that carry no url.
pub(crate) async fn upload_media<M>(
    media_uploader: &M,
    path: &Path,
) -> Result<UploadedMedia, MediaUploadError>
where
    M: MediaUploader + ?Sized,
{
    let media = media_uploader.upload(path).await?;
    if media.url.trim().is_empty() {
        return Err(MediaUploadError::MissingUrl);
    }
    Ok(media)
}
