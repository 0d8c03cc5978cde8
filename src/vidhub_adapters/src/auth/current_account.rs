use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use vidhub_core::{Account, AccountStore, AccountStoreError, MediaUploader, TokenIssuer};

use super::cookies::extract_access_token;
use crate::http::{AppState, routes::ApiError};

/// Account of the caller, resolved from the access token.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl<S, M> FromRequestParts<AppState<S, M>> for CurrentAccount
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, M>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = extract_access_token(&jar, &parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized request"))?;

        let id = state.token_issuer.verify_access_token(&token).map_err(|e| {
            tracing::debug!(error = %e, "Access token failed verification");
            ApiError::unauthorized("Invalid access token")
        })?;

        match state.account_store.get_account(&id).await {
            Ok(account) => Ok(CurrentAccount(account)),
            Err(AccountStoreError::AccountNotFound) => {
                Err(ApiError::unauthorized("Invalid access token"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
