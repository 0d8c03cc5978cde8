use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    account_id::AccountId, email::Email, full_name::FullName, password::Password,
    username::Username,
};

/// Stored account record as seen by the application layer.
///
/// The password hash never leaves the store, and the refresh token is only
/// reachable through [`Account::refresh_token_matches`]. Anything that goes out
/// over the wire is built from [`Account::profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AccountId,
        username: Username,
        email: Email,
        full_name: FullName,
        avatar_url: String,
        cover_image_url: Option<String>,
        refresh_token: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            full_name,
            avatar_url,
            cover_image_url: cover_image_url.filter(|url| !url.is_empty()),
            refresh_token,
            created_at,
            updated_at,
        }
    }

    /// Builds the record for a freshly created account.
    pub fn from_new(id: AccountId, new_account: &NewAccount, now: DateTime<Utc>) -> Self {
        Self::new(
            id,
            new_account.username.clone(),
            new_account.email.clone(),
            new_account.full_name.clone(),
            new_account.avatar_url.clone(),
            new_account.cover_image_url.clone(),
            None,
            now,
            now,
        )
    }

    pub fn refresh_token_matches(&self, candidate: &str) -> bool {
        self.refresh_token.as_deref() == Some(candidate)
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }

    pub fn set_refresh_token(&mut self, refresh_token: Option<String>) {
        self.refresh_token = refresh_token;
    }

    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            avatar_url: self.avatar_url.clone(),
            cover_image_url: self.cover_image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Input for creating an account; the password is hashed by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub password: Password,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
}

/// Sanitized account representation returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: AccountId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
