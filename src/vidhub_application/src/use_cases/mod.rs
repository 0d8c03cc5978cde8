pub mod change_password;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod update_account_details;
pub mod update_media;

pub use change_password::{ChangePasswordError, ChangePasswordUseCase};
pub use login::{LoginError, LoginOutcome, LoginUseCase};
pub use logout::{LogoutError, LogoutUseCase};
pub use refresh_token::{RefreshTokenError, RefreshTokenUseCase};
pub use register::{RegisterCommand, RegisterError, RegisterUseCase};
pub use update_account_details::{UpdateAccountDetailsError, UpdateAccountDetailsUseCase};
pub use update_media::{MediaSlot, UpdateMediaError, UpdateMediaUseCase};
