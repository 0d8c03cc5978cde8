use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use vidhub_application::RefreshTokenUseCase;
use vidhub_core::{AccountStore, MediaUploader, TokenPair};

use super::error::ApiError;
use crate::auth::with_auth_cookies;
use crate::config::REFRESH_TOKEN_COOKIE_NAME;
use crate::http::{AppState, envelope::ApiResponse};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[tracing::instrument(name = "Refresh access token", skip_all)]
pub async fn refresh_token<S, M>(
    State(state): State<AppState<S, M>>,
    jar: CookieJar,
    request: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    // A missing or unreadable body only means the token has to come from the cookie
    let from_body = request
        .map(|Json(request)| request.refresh_token)
        .unwrap_or_default();
    let incoming = jar
        .get(REFRESH_TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .or(from_body);

    let use_case = RefreshTokenUseCase::new(&*state.account_store, &*state.token_issuer);
    let tokens: TokenPair = use_case.execute(incoming).await?;

    let jar = with_auth_cookies(jar, &tokens);
    Ok((jar, ApiResponse::ok(tokens, "Access token refreshed")))
}
