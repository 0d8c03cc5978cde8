use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;
use vidhub_application::UpdateAccountDetailsUseCase;
use vidhub_core::{AccountStore, Email, FullName, MediaUploader};

use super::error::ApiError;
use crate::auth::CurrentAccount;
use crate::http::{AppState, envelope::ApiResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[tracing::instrument(name = "Update account details", skip_all, fields(account_id = %account.id))]
pub async fn update_account<S, M>(
    State(state): State<AppState<S, M>>,
    CurrentAccount(account): CurrentAccount,
    request: Result<Json<UpdateAccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let Json(request) = request?;

    let full_name = FullName::parse(request.full_name.unwrap_or_default())?;
    let email = Email::parse(request.email.unwrap_or_default())?;

    let use_case = UpdateAccountDetailsUseCase::new(&*state.account_store);
    let updated = use_case.execute(&account.id, full_name, email).await?;

    Ok(ApiResponse::ok(
        updated.profile(),
        "Account details updated successfully",
    ))
}
