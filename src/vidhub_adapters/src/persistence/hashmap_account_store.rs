use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use secrecy::Secret;
use tokio::sync::RwLock;
use vidhub_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, FullName, NewAccount, Password,
    Username,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

#[derive(Clone)]
struct StoredAccount {
    account: Account,
    password_hash: Secret<String>,
}

#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, StoredAccount>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn modify<F>(&self, id: &AccountId, apply: F) -> Result<Account, AccountStoreError>
    where
        F: FnOnce(&mut StoredAccount),
    {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        apply(stored);
        stored.account.updated_at = Utc::now();
        Ok(stored.account.clone())
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let password_hash = compute_password_hash(new_account.password.clone())
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let mut accounts = self.accounts.write().await;
        let taken = accounts.values().any(|stored| {
            stored.account.username == new_account.username
                || stored.account.email == new_account.email
        });
        if taken {
            return Err(AccountStoreError::AccountAlreadyExists);
        }

        let account = Account::from_new(AccountId::new(), &new_account, Utc::now());
        accounts.insert(
            account.id,
            StoredAccount {
                account: account.clone(),
                password_hash,
            },
        );
        Ok(account)
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(id)
            .map(|stored| stored.account.clone())
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&Username>,
        email: Option<&Email>,
    ) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .map(|stored| &stored.account)
            .find(|account| {
                username.is_some_and(|username| &account.username == username)
                    || email.is_some_and(|email| &account.email == email)
            })
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn authenticate(
        &self,
        id: &AccountId,
        password: &Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = {
            let accounts = self.accounts.read().await;
            let stored = accounts.get(id).ok_or(AccountStoreError::AccountNotFound)?;
            stored.password_hash.clone()
        };

        verify_password_hash(password_hash, password.clone())
            .await
            .map_err(AccountStoreError::from)
    }

    async fn set_new_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        self.modify(id, |stored| stored.password_hash = password_hash)
            .await
            .map(|_| ())
    }

    async fn set_refresh_token(
        &self,
        id: &AccountId,
        refresh_token: Option<String>,
    ) -> Result<(), AccountStoreError> {
        self.modify(id, |stored| stored.account.set_refresh_token(refresh_token))
            .await
            .map(|_| ())
    }

    async fn update_details(
        &self,
        id: &AccountId,
        full_name: FullName,
        email: Email,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let taken = accounts
            .values()
            .any(|stored| stored.account.id != *id && stored.account.email == email);
        if taken {
            return Err(AccountStoreError::AccountAlreadyExists);
        }

        let stored = accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        stored.account.full_name = full_name;
        stored.account.email = email;
        stored.account.updated_at = Utc::now();
        Ok(stored.account.clone())
    }

    async fn set_avatar_url(
        &self,
        id: &AccountId,
        avatar_url: String,
    ) -> Result<Account, AccountStoreError> {
        self.modify(id, |stored| stored.account.avatar_url = avatar_url)
            .await
    }

    async fn set_cover_image_url(
        &self,
        id: &AccountId,
        cover_image_url: String,
    ) -> Result<Account, AccountStoreError> {
        self.modify(id, |stored| {
            stored.account.cover_image_url = Some(cover_image_url)
        })
        .await
    }
}
