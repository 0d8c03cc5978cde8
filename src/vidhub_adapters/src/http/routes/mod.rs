pub mod change_password;
pub mod current_account;
pub mod error;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod update_account;
pub mod update_media;

pub use change_password::{ChangePasswordRequest, change_password};
pub use current_account::current_account;
pub use error::{ApiError, ApiErrorKind, ErrorResponse};
pub use login::{LoginRequest, LoginResponse, login};
pub use logout::logout;
pub use refresh_token::{RefreshTokenRequest, refresh_token};
pub use register::register;
pub use update_account::{UpdateAccountRequest, update_account};
pub use update_media::{update_avatar, update_cover_image};
