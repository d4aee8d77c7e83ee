//! Routers: product CRUD, API documentation, and health/readiness/version.

pub mod common;
pub mod docs;
pub mod products;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc};
pub use products::product_routes;
