//! Products REST API: CRUD over a PostgreSQL-backed product catalogue.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use app::build_app;
pub use config::{Config, DatabaseConfig};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Product, ProductInput, ProductSummary};
pub use state::AppState;
pub use store::{MemoryProductStore, PgProductStore, ProductStore};
