use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use vidhub_application::LogoutUseCase;
use vidhub_core::{AccountStore, MediaUploader};

use super::error::ApiError;
use crate::auth::{CurrentAccount, without_auth_cookies};
use crate::http::{
    AppState,
    envelope::{ApiResponse, Empty},
};

#[tracing::instrument(name = "Logout", skip_all, fields(account_id = %account.id))]
pub async fn logout<S, M>(
    State(state): State<AppState<S, M>>,
    CurrentAccount(account): CurrentAccount,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let use_case = LogoutUseCase::new(&*state.account_store);
    use_case.execute(&account.id).await?;

    Ok((
        without_auth_cookies(jar),
        ApiResponse::ok(Empty::default(), "Account logged out"),
    ))
}
