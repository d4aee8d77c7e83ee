//! Product persistence behind an injected trait object.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::{ensure_database_exists, PgProductStore};

use crate::error::StoreError;
use crate::model::{Product, ProductInput, ProductSummary};
use async_trait::async_trait;

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, most expensive first. Ties have no defined order.
    async fn list_all(&self) -> Result<Vec<ProductSummary>, StoreError>;

    /// `None` when no product has this id.
    async fn get(&self, id: i32) -> Result<Option<Product>, StoreError>;

    async fn create(&self, input: &ProductInput) -> Result<Product, StoreError>;

    /// Replace name, price and availability. `None` when the id does not resolve.
    async fn update(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, StoreError>;

    /// Flip availability, then return the record as re-read from the store.
    async fn toggle_availability(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// `false` when there was nothing to delete.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Reachability check used by `/ready`.
    async fn ping(&self) -> Result<(), StoreError>;
}
