pub mod envelope;
pub mod multipart;
pub mod routes;
pub mod state;

pub use envelope::{ApiResponse, Empty};
pub use state::AppState;
