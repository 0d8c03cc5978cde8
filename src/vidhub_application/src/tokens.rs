use vidhub_core::{AccountId, AccountStore, AccountStoreError, TokenError, TokenIssuer, TokenPair};

/// Failures while issuing a token pair. Callers have already authenticated the
/// account, so every variant is an internal error from the client's view.
#[derive(Debug, thiserror::Error)]
pub enum TokenIssueError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

/// Signs a fresh access/refresh pair for `id` and persists the refresh token
/// on the account, replacing whatever was stored before.
#[tracing::instrument(name = "Issue token pair", skip(account_store, token_issuer))]
pub async fn issue_token_pair<S, T>(
    account_store: &S,
    token_issuer: &T,
    id: &AccountId,
) -> Result<TokenPair, TokenIssueError>
where
    S: AccountStore + ?Sized,
    T: TokenIssuer + ?Sized,
{
    let account = account_store.get_account(id).await?;

    let access_token = token_issuer.issue_access_token(&account)?;
    let refresh_token = token_issuer.issue_refresh_token(&account)?;

    account_store
        .set_refresh_token(id, Some(refresh_token.clone()))
        .await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}
