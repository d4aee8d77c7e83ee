//! Request extractors that run input-shape validation before a handler.

pub mod product;

pub use product::{ProductId, ProductPayload};
