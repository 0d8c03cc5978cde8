use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use vidhub_application::LoginUseCase;
use vidhub_core::{AccountProfile, AccountStore, Email, MediaUploader, Password, Username};

use super::error::ApiError;
use crate::auth::with_auth_cookies;
use crate::http::{AppState, envelope::ApiResponse};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub account: AccountProfile,
    pub access_token: String,
    pub refresh_token: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, M>(
    State(state): State<AppState<S, M>>,
    jar: CookieJar,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    let Json(request) = request?;

    let username = non_blank(request.username)
        .map(Username::parse)
        .transpose()?;
    let email = non_blank(request.email).map(Email::parse).transpose()?;
    if username.is_none() && email.is_none() {
        return Err(ApiError::validation("Username or email is required"));
    }
    let password = Password::parse(
        request.password.unwrap_or_else(|| Secret::from(String::new())),
        "password",
    )?;

    let use_case = LoginUseCase::new(&*state.account_store, &*state.token_issuer);
    let outcome = use_case.execute(username, email, password).await?;

    let jar = with_auth_cookies(jar, &outcome.tokens);
    let body = LoginResponse {
        account: outcome.account.profile(),
        access_token: outcome.tokens.access_token,
        refresh_token: outcome.tokens.refresh_token,
    };

    Ok((jar, ApiResponse::ok(body, "Account logged in successfully")))
}
