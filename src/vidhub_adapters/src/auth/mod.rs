pub mod cookies;
pub mod current_account;
pub mod jwt;

pub use cookies::{
    create_auth_cookie, create_removal_cookie, extract_access_token, with_auth_cookies,
    without_auth_cookies,
};
pub use current_account::CurrentAccount;
pub use jwt::{AccessClaims, JwtConfig, JwtTokenIssuer, RefreshClaims};
