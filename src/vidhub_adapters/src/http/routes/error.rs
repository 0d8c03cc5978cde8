use axum::{
    Json,
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing_error::SpanTrace;
use vidhub_application::{
    ChangePasswordError, LoginError, LogoutError, RefreshTokenError, RegisterError,
    TokenIssueError, UpdateAccountDetailsError, UpdateMediaError,
};
use vidhub_core::{AccountStoreError, ValidationError};

use crate::config::{AppEnvironment, app_environment};

/// Error body: `{statusCode, message, success, errors, data}` plus `stack`
/// outside production.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
    pub errors: Vec<String>,
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Validation,
    Unauthorized,
    Conflict,
    Internal,
}

impl ApiErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiErrorKind::Validation => StatusCode::BAD_REQUEST,
            ApiErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorKind::Conflict => StatusCode::CONFLICT,
            ApiErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    errors: Vec<String>,
    span_trace: SpanTrace,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: Vec::new(),
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Conflict, message)
    }

    /// Logs `cause` and hides it behind `message`.
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        let error = Self::new(ApiErrorKind::Internal, message);
        tracing::error!(error = %cause, "{}", error.message);
        error
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let stack = stack_trace(app_environment(), &self.span_trace);

        let body = Json(ErrorResponse {
            status_code: status_code.as_u16(),
            message: self.message,
            success: false,
            errors: self.errors,
            data: None,
            stack,
        });

        (status_code, body).into_response()
    }
}

/// Span trace rendered for the error body, hidden in production.
fn stack_trace(environment: AppEnvironment, span_trace: &SpanTrace) -> Option<String> {
    match environment {
        AppEnvironment::Production => None,
        AppEnvironment::Development => Some(span_trace.to_string()),
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::validation(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("Invalid JSON body").with_errors(vec![rejection.body_text()])
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::validation("Invalid multipart body").with_errors(vec![rejection.body_text()])
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::AccountAlreadyExists => {
                ApiError::conflict("Account with this username or email already exists")
            }
            AccountStoreError::AccountNotFound => ApiError::internal("Account not found", error),
            AccountStoreError::IncorrectPassword => ApiError::unauthorized(error.to_string()),
            AccountStoreError::UnexpectedError(_) => {
                ApiError::internal("Something went wrong while accessing accounts", error)
            }
        }
    }
}

impl From<TokenIssueError> for ApiError {
    fn from(error: TokenIssueError) -> Self {
        ApiError::internal(
            "Something went wrong while generating access and refresh tokens",
            error,
        )
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::AccountAlreadyExists => ApiError::conflict(error.to_string()),
            RegisterError::AvatarRequired => ApiError::validation(error.to_string()),
            RegisterError::AvatarUploadFailed(ref cause) => {
                tracing::warn!(error = %cause, "Avatar upload failed");
                ApiError::validation("Avatar file is required")
            }
            RegisterError::AccountNotPersisted => ApiError::internal(error.to_string(), &error),
            RegisterError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::MissingIdentifier | LoginError::AccountNotFound => {
                ApiError::validation(error.to_string())
            }
            LoginError::InvalidCredentials => ApiError::unauthorized(error.to_string()),
            LoginError::TokenIssueError(e) => e.into(),
            LoginError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<RefreshTokenError> for ApiError {
    fn from(error: RefreshTokenError) -> Self {
        match error {
            RefreshTokenError::MissingToken
            | RefreshTokenError::InvalidToken
            | RefreshTokenError::TokenMismatch => ApiError::unauthorized(error.to_string()),
            RefreshTokenError::TokenIssueError(e) => e.into(),
            RefreshTokenError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::IncorrectOldPassword => ApiError::validation(error.to_string()),
            ChangePasswordError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateAccountDetailsError> for ApiError {
    fn from(error: UpdateAccountDetailsError) -> Self {
        match error {
            UpdateAccountDetailsError::EmailTaken => ApiError::conflict(error.to_string()),
            UpdateAccountDetailsError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateMediaError> for ApiError {
    fn from(error: UpdateMediaError) -> Self {
        match error {
            UpdateMediaError::FileMissing(_) | UpdateMediaError::UploadFailed(..) => {
                ApiError::validation(error.to_string())
            }
            UpdateMediaError::AccountStoreError(e) => e.into(),
        }
    }
}
