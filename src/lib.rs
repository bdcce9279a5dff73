pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{Config, CorsOrigins};
pub use db::{current_epoch_ms, init_pool, run_migrations};
pub use error::{ApiError, StoreError};
pub use routes::create_router;
pub use state::AppState;
