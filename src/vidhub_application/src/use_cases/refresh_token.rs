use vidhub_core::{AccountStore, AccountStoreError, TokenIssuer, TokenPair};

use crate::tokens::{TokenIssueError, issue_token_pair};

/// Error types for refresh token use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshTokenError {
    #[error("Unauthorized request")]
    MissingToken,
    #[error("Invalid refresh token")]
    InvalidToken,
    #[error("Refresh token is expired or used")]
    TokenMismatch,
    #[error("Something went wrong while generating access and refresh tokens")]
    TokenIssueError(#[from] TokenIssueError),
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Refresh use case - rotates the token pair for a still-current refresh token
pub struct RefreshTokenUseCase<'a, S, T>
where
    S: AccountStore,
    T: TokenIssuer,
{
    account_store: &'a S,
    token_issuer: &'a T,
}

impl<'a, S, T> RefreshTokenUseCase<'a, S, T>
where
    S: AccountStore,
    T: TokenIssuer,
{
    pub fn new(account_store: &'a S, token_issuer: &'a T) -> Self {
        Self {
            account_store,
            token_issuer,
        }
    }

    /// Execute the refresh use case
    ///
    /// The incoming token must verify against the refresh secret and equal the
    /// value currently stored on the account; only one refresh token per
    /// account is live at a time.
    #[tracing::instrument(name = "RefreshTokenUseCase::execute", skip_all)]
    pub async fn execute(&self, incoming: Option<String>) -> Result<TokenPair, RefreshTokenError> {
        let incoming = incoming
            .filter(|token| !token.trim().is_empty())
            .ok_or(RefreshTokenError::MissingToken)?;

        let id = self
            .token_issuer
            .verify_refresh_token(&incoming)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token failed verification");
                RefreshTokenError::InvalidToken
            })?;

        let account = match self.account_store.get_account(&id).await {
            Ok(account) => account,
            Err(AccountStoreError::AccountNotFound) => return Err(RefreshTokenError::InvalidToken),
            Err(e) => return Err(e.into()),
        };

        if !account.refresh_token_matches(&incoming) {
            return Err(RefreshTokenError::TokenMismatch);
        }

        let tokens = issue_token_pair(self.account_store, self.token_issuer, &account.id).await?;
        Ok(tokens)
    }
}
