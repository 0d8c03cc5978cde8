use vidhub_core::{
    Account, AccountStore, AccountStoreError, Email, Password, TokenIssuer, TokenPair, Username,
};

use crate::tokens::{TokenIssueError, issue_token_pair};

/// Authenticated account together with its freshly issued tokens
#[derive(Debug)]
pub struct LoginOutcome {
    pub account: Account,
    pub tokens: TokenPair,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Username or email is required")]
    MissingIdentifier,
    #[error("Account does not exist")]
    AccountNotFound,
    #[error("Invalid account credentials")]
    InvalidCredentials,
    #[error("Something went wrong while generating access and refresh tokens")]
    TokenIssueError(#[from] TokenIssueError),
    #[error("Account store error: {0}")]
    AccountStoreError(AccountStoreError),
}

impl From<AccountStoreError> for LoginError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountNotFound => LoginError::AccountNotFound,
            AccountStoreError::IncorrectPassword => LoginError::InvalidCredentials,
            other => LoginError::AccountStoreError(other),
        }
    }
}

/// Login use case - checks credentials and issues a token pair
pub struct LoginUseCase<'a, S, T>
where
    S: AccountStore,
    T: TokenIssuer,
{
    account_store: &'a S,
    token_issuer: &'a T,
}

impl<'a, S, T> LoginUseCase<'a, S, T>
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

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `username` - Optional username identifier
    /// * `email` - Optional email identifier; at least one of the two is required
    /// * `password` - Password to check against the stored hash
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        username: Option<Username>,
        email: Option<Email>,
        password: Password,
    ) -> Result<LoginOutcome, LoginError> {
        if username.is_none() && email.is_none() {
            return Err(LoginError::MissingIdentifier);
        }

        let account = self
            .account_store
            .find_by_username_or_email(username.as_ref(), email.as_ref())
            .await?;

        self.account_store
            .authenticate(&account.id, &password)
            .await?;

        let tokens = issue_token_pair(self.account_store, self.token_issuer, &account.id).await?;

        let account = self.account_store.get_account(&account.id).await?;

        Ok(LoginOutcome { account, tokens })
    }
}
