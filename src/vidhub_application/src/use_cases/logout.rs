use vidhub_core::{AccountId, AccountStore, AccountStoreError};

/// Error types for logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Logout use case - forgets the stored refresh token
pub struct LogoutUseCase<'a, S>
where
    S: AccountStore,
{
    account_store: &'a S,
}

impl<'a, S> LogoutUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(account_store: &'a S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub async fn execute(&self, id: &AccountId) -> Result<(), LogoutError> {
        self.account_store.set_refresh_token(id, None).await?;
        Ok(())
    }
}
