use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    response::IntoResponse,
};
use vidhub_application::{MediaSlot, UpdateMediaUseCase};
use vidhub_core::{Account, AccountStore, MediaUploader};

use super::error::ApiError;
use crate::auth::CurrentAccount;
use crate::http::{
    AppState,
    envelope::ApiResponse,
    multipart::{StagedUploads, remove_staged},
};

#[tracing::instrument(name = "Update avatar", skip_all, fields(account_id = %account.id))]
pub async fn update_avatar<S, M>(
    State(state): State<AppState<S, M>>,
    CurrentAccount(account): CurrentAccount,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let updated = replace_media(&state, &account, multipart?, MediaSlot::Avatar).await?;
    Ok(ApiResponse::ok(
        updated.profile(),
        "Avatar image updated successfully",
    ))
}

#[tracing::instrument(name = "Update cover image", skip_all, fields(account_id = %account.id))]
pub async fn update_cover_image<S, M>(
    State(state): State<AppState<S, M>>,
    CurrentAccount(account): CurrentAccount,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let updated = replace_media(&state, &account, multipart?, MediaSlot::CoverImage).await?;
    Ok(ApiResponse::ok(
        updated.profile(),
        "Cover image updated successfully",
    ))
}

async fn replace_media<S, M>(
    state: &AppState<S, M>,
    account: &Account,
    multipart: Multipart,
    slot: MediaSlot,
) -> Result<Account, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let mut staged = StagedUploads::from_multipart(multipart, &state.uploads.temp_dir).await?;
    let file = staged.take_file(slot.field_name());
    staged.discard().await;

    let use_case = UpdateMediaUseCase::new(&*state.account_store, &*state.media_uploader, slot);
    let result = use_case.execute(&account.id, file.clone()).await;

    remove_staged(file).await;

    Ok(result?)
}
