use std::path::PathBuf;

use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::Secret;
use vidhub_application::{MediaSlot, RegisterCommand, RegisterUseCase};
use vidhub_core::{AccountStore, Email, FullName, MediaUploader, Password, Username};

use super::error::ApiError;
use crate::http::{
    AppState, envelope::ApiResponse, multipart::StagedUploads, multipart::remove_staged,
};

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, M>(
    State(state): State<AppState<S, M>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let mut staged = StagedUploads::from_multipart(multipart?, &state.uploads.temp_dir).await?;
    let avatar = staged.take_file(MediaSlot::Avatar.field_name());
    let cover_image = staged.take_file(MediaSlot::CoverImage.field_name());

    let result = register_account(&state, &staged, avatar.clone(), cover_image.clone()).await;

    staged.discard().await;
    remove_staged(avatar.into_iter().chain(cover_image)).await;

    let profile = result?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        profile,
        "Account registered successfully",
    ))
}

async fn register_account<S, M>(
    state: &AppState<S, M>,
    staged: &StagedUploads,
    avatar: Option<PathBuf>,
    cover_image: Option<PathBuf>,
) -> Result<vidhub_core::AccountProfile, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let field = |name: &str| staged.text(name).unwrap_or_default();

    let command = RegisterCommand {
        full_name: FullName::parse(field("fullName"))?,
        username: Username::parse(field("username"))?,
        email: Email::parse(field("email"))?,
        password: Password::parse(Secret::from(field("password").to_owned()), "password")?,
        avatar,
        cover_image,
    };

    let use_case = RegisterUseCase::new(&*state.account_store, &*state.media_uploader);
    let account = use_case.execute(command).await?;

    Ok(account.profile())
}
