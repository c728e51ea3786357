pub mod handlers;
pub mod server;

pub use handlers::{AppState, ConfigLookup};
pub use server::{build_router, run_server, ServerConfig, CRON_ROUTE};
