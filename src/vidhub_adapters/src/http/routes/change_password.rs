use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::Deserialize;
use vidhub_application::ChangePasswordUseCase;
use vidhub_core::{AccountStore, MediaUploader, Password};

use super::error::ApiError;
use crate::auth::CurrentAccount;
use crate::http::{
    AppState,
    envelope::{ApiResponse, Empty},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Change password", skip_all, fields(account_id = %account.id))]
pub async fn change_password<S, M>(
    State(state): State<AppState<S, M>>,
    CurrentAccount(account): CurrentAccount,
    request: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let Json(request) = request?;

    let blank = || Secret::from(String::new());
    let old_password = Password::parse(request.old_password.unwrap_or_else(blank), "oldPassword")?;
    let new_password = Password::parse(request.new_password.unwrap_or_else(blank), "newPassword")?;

    let use_case = ChangePasswordUseCase::new(&*state.account_store);
    use_case
        .execute(&account.id, old_password, new_password)
        .await?;

    Ok(ApiResponse::ok(
        Empty::default(),
        "Password changed successfully",
    ))
}
