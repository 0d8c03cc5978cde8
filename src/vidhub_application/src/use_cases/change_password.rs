use vidhub_core::{AccountId, AccountStore, AccountStoreError, Password};

/// Error types for change password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("Invalid old password")]
    IncorrectOldPassword,
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

impl From<AccountStoreError> for ChangePasswordError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::IncorrectPassword => ChangePasswordError::IncorrectOldPassword,
            other => ChangePasswordError::AccountStoreError(other),
        }
    }
}

/// Change password use case - updates user's password
pub struct ChangePasswordUseCase<'a, S>
where
    S: AccountStore,
{
    account_store: &'a S,
}

impl<'a, S> ChangePasswordUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(account_store: &'a S) -> Self {
        Self { account_store }
    }

    /// Execute the change password use case
    ///
    /// # Arguments
    /// * `id` - Account of the authenticated caller
    /// * `old_password` - Must match the stored hash
    /// * `new_password` - The new password to set
    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip(self, old_password, new_password))]
    pub async fn execute(
        &self,
        id: &AccountId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        self.account_store.authenticate(id, &old_password).await?;

        self.account_store.set_new_password(id, new_password).await?;

        Ok(())
    }
}
