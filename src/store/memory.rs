//! In-process product store. Same contract as the PostgreSQL store; used by
//! the test suite and for running without a database.

use super::ProductStore;
use crate::error::StoreError;
use crate::model::{Product, ProductInput, ProductSummary};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<ProductSummary>, StoreError> {
        let inner = self.inner.read().await;
        let mut rows: Vec<ProductSummary> = inner.rows.values().cloned().map(ProductSummary::from).collect();
        rows.sort_by(|a, b| b.price.total_cmp(&a.price));
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, StoreError> {
        if let Some(reason) = input.violation() {
            return Err(StoreError::Constraint(reason));
        }
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let product = Product {
            id: inner.last_id,
            name: input.name.clone(),
            price: input.price,
            availability: input.availability,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, StoreError> {
        if let Some(reason) = input.violation() {
            return Err(StoreError::Constraint(reason));
        }
        let mut inner = self.inner.write().await;
        let Some(product) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        product.name = input.name.clone();
        product.price = input.price;
        product.availability = input.availability;
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn toggle_availability(&self, id: i32) -> Result<Option<Product>, StoreError> {
        {
            let mut inner = self.inner.write().await;
            let Some(product) = inner.rows.get_mut(&id) else {
                return Ok(None);
            };
            product.availability = !product.availability;
            product.updated_at = Utc::now();
        }
        self.get(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
