pub mod account;
pub mod account_id;
pub mod email;
pub mod full_name;
pub mod password;
pub mod token_pair;
pub mod username;
pub mod validation;
