use vidhub_core::{Account, AccountId, AccountStore, AccountStoreError, Email, FullName};

/// Error types for account details update
#[derive(Debug, thiserror::Error)]
pub enum UpdateAccountDetailsError {
    #[error("Email is already used by another account")]
    EmailTaken,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

impl From<AccountStoreError> for UpdateAccountDetailsError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountAlreadyExists => UpdateAccountDetailsError::EmailTaken,
            other => UpdateAccountDetailsError::AccountStoreError(other),
        }
    }
}

pub struct UpdateAccountDetailsUseCase<'a, S>
where
    S: AccountStore,
{
    account_store: &'a S,
}

impl<'a, S> UpdateAccountDetailsUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(account_store: &'a S) -> Self {
        Self { account_store }
    }

    #[tracing::instrument(name = "UpdateAccountDetailsUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        id: &AccountId,
        full_name: FullName,
        email: Email,
    ) -> Result<Account, UpdateAccountDetailsError> {
        let account = self
            .account_store
            .update_details(id, full_name, email)
            .await?;
        Ok(account)
    }
}
