use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;
use vidhub_core::{
    Account, AccountId, AccountStore, AccountStoreError, Email, FullName, NewAccount, Password,
    Username,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

const ACCOUNT_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
     refresh_token, created_at, updated_at";

pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }

    async fn fetch_one_updated(
        &self,
        query: sqlx::query::QueryAs<'_, Postgres, AccountRow, sqlx::postgres::PgArguments>,
    ) -> Result<Account, AccountStoreError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    username: String,
    email: String,
    full_name: String,
    avatar_url: String,
    cover_image_url: Option<String>,
    refresh_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let unexpected = |e: vidhub_core::ValidationError| {
            AccountStoreError::UnexpectedError(e.to_string())
        };

        Ok(Account::new(
            AccountId::from(row.id),
            Username::parse(row.username).map_err(unexpected)?,
            Email::parse(row.email).map_err(unexpected)?,
            FullName::parse(row.full_name).map_err(unexpected)?,
            row.avatar_url,
            row.cover_image_url,
            row.refresh_token,
            row.created_at,
            row.updated_at,
        ))
    }
}

fn map_write_error(e: sqlx::Error) -> AccountStoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return AccountStoreError::AccountAlreadyExists;
    }
    AccountStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn add_account(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        let password_hash = compute_password_hash(new_account.password.clone())
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let sql = format!(
            r#"
                INSERT INTO accounts
                    (id, username, email, full_name, password_hash, avatar_url, cover_image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row: AccountRow = sqlx::query_as(&sql)
            .bind(AccountId::new().as_uuid())
            .bind(new_account.username.as_str())
            .bind(new_account.email.as_str())
            .bind(new_account.full_name.as_str())
            .bind(password_hash.expose_secret())
            .bind(&new_account.avatar_url)
            .bind(new_account.cover_image_url.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        row.try_into()
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Looking up account by username or email", skip_all)]
    async fn find_by_username_or_email(
        &self,
        username: Option<&Username>,
        email: Option<&Email>,
    ) -> Result<Account, AccountStoreError> {
        if username.is_none() && email.is_none() {
            return Err(AccountStoreError::AccountNotFound);
        }

        let sql = format!(
            r#"
                SELECT {ACCOUNT_COLUMNS}
                FROM accounts
                WHERE username = $1 OR email = $2
                ORDER BY created_at
                LIMIT 1
            "#
        );

        let row: Option<AccountRow> = sqlx::query_as(&sql)
            .bind(username.map(Username::as_str))
            .bind(email.map(Email::as_str))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        row.ok_or(AccountStoreError::AccountNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Validating account credentials in PostgreSQL", skip_all)]
    async fn authenticate(
        &self,
        id: &AccountId,
        password: &Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM accounts WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(password_hash) = password_hash else {
            return Err(AccountStoreError::AccountNotFound);
        };

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(AccountStoreError::from)
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(AccountStoreError::UnexpectedError)?;

        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET password_hash = $1, updated_at = now()
                WHERE id = $2
            "#,
        )
        .bind(password_hash.expose_secret())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Storing refresh token", skip_all)]
    async fn set_refresh_token(
        &self,
        id: &AccountId,
        refresh_token: Option<String>,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET refresh_token = $1, updated_at = now()
                WHERE id = $2
            "#,
        )
        .bind(refresh_token)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Updating account details", skip_all)]
    async fn update_details(
        &self,
        id: &AccountId,
        full_name: FullName,
        email: Email,
    ) -> Result<Account, AccountStoreError> {
        let sql = format!(
            r#"
                UPDATE accounts
                SET full_name = $1, email = $2, updated_at = now()
                WHERE id = $3
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        self.fetch_one_updated(
            sqlx::query_as(&sql)
                .bind(full_name.as_str())
                .bind(email.as_str())
                .bind(id.as_uuid()),
        )
        .await
    }

    #[tracing::instrument(name = "Updating avatar url", skip_all)]
    async fn set_avatar_url(
        &self,
        id: &AccountId,
        avatar_url: String,
    ) -> Result<Account, AccountStoreError> {
        let sql = format!(
            r#"
                UPDATE accounts
                SET avatar_url = $1, updated_at = now()
                WHERE id = $2
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        self.fetch_one_updated(sqlx::query_as(&sql).bind(avatar_url).bind(id.as_uuid()))
            .await
    }

    #[tracing::instrument(name = "Updating cover image url", skip_all)]
    async fn set_cover_image_url(
        &self,
        id: &AccountId,
        cover_image_url: String,
    ) -> Result<Account, AccountStoreError> {
        let sql = format!(
            r#"
                UPDATE accounts
                SET cover_image_url = $1, updated_at = now()
                WHERE id = $2
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        self.fetch_one_updated(
            sqlx::query_as(&sql)
                .bind(cover_image_url)
                .bind(id.as_uuid()),
        )
        .await
    }
}
