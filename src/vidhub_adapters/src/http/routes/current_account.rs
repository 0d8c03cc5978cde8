use axum::response::IntoResponse;

use crate::auth::CurrentAccount;
use crate::http::envelope::ApiResponse;

#[tracing::instrument(name = "Current account", skip_all, fields(account_id = %account.id))]
pub async fn current_account(CurrentAccount(account): CurrentAccount) -> impl IntoResponse {
    ApiResponse::ok(account.profile(), "Current account fetched successfully")
}
