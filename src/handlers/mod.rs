//! HTTP handlers for product CRUD.

pub mod products;
pub use products::*;
