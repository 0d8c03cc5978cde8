use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;
use vidhub_core::{Account, AccountId, TokenError, TokenIssuer};

use crate::config::{AuthSettings, TokenSettings};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl From<&TokenSettings> for JwtConfig {
    fn from(settings: &TokenSettings) -> Self {
        Self {
            secret: settings.secret.clone(),
            ttl_in_seconds: settings.ttl_in_seconds,
        }
    }
}

/// Signs access and refresh tokens with separate secrets and lifetimes.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    access: JwtConfig,
    refresh: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(access: JwtConfig, refresh: JwtConfig) -> Self {
        Self { access, refresh }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            JwtConfig::from(&settings.access_token),
            JwtConfig::from(&settings.refresh_token),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub sub: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_access_token(&self, account: &Account) -> Result<String, TokenError> {
        let (iat, exp) = issued_and_expiry(self.access.ttl_in_seconds)?;
        let claims = AccessClaims {
            sub: account.id.to_string(),
            username: account.username.to_string(),
            email: account.email.to_string(),
            full_name: account.full_name.as_str().to_owned(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };
        create_token(&claims, self.access.as_bytes())
    }

    fn issue_refresh_token(&self, account: &Account) -> Result<String, TokenError> {
        let (iat, exp) = issued_and_expiry(self.refresh.ttl_in_seconds)?;
        let claims = RefreshClaims {
            sub: account.id.to_string(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };
        create_token(&claims, self.refresh.as_bytes())
    }

    fn verify_access_token(&self, token: &str) -> Result<AccountId, TokenError> {
        let claims: AccessClaims = decode_token(token, self.access.as_bytes())?;
        subject(&claims.sub)
    }

    fn verify_refresh_token(&self, token: &str) -> Result<AccountId, TokenError> {
        let claims: RefreshClaims = decode_token(token, self.refresh.as_bytes())?;
        subject(&claims.sub)
    }
}

fn issued_and_expiry(token_ttl_seconds: i64) -> Result<(usize, usize), TokenError> {
    let delta = chrono::Duration::try_seconds(token_ttl_seconds).ok_or(TokenError::Signing(
        "Failed to create token duration".to_string(),
    ))?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenError::Signing("Duration out of range".to_string()))?
        .timestamp();

    let to_usize = |timestamp: i64| {
        usize::try_from(timestamp)
            .map_err(|_| TokenError::Signing("Failed to cast i64 to usize".to_string()))
    };

    Ok((to_usize(now.timestamp())?, to_usize(exp)?))
}

fn create_token<C: Serialize>(claims: &C, secret: &[u8]) -> Result<String, TokenError> {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
        .map_err(|e| TokenError::Signing(e.to_string()))
}

fn decode_token<C: DeserializeOwned + Clone>(token: &str, secret: &[u8]) -> Result<C, TokenError> {
    decode::<C>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| TokenError::Invalid(e.to_string()))
}

fn subject(sub: &str) -> Result<AccountId, TokenError> {
    AccountId::parse(sub).map_err(|e| TokenError::Invalid(e.to_string()))
}
