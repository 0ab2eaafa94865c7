pub mod api;
pub mod server;

pub use api::{build_router, AppState};
pub use server::start_server;
