pub mod tokens;
pub mod use_cases;


pub use tokens::{TokenIssueError, issue_token_pair};
pub use use_cases::*;
