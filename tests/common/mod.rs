//! Shared helpers: app over an in-memory or always-failing store, request plumbing.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use products_api::{
    build_app, AppState, MemoryProductStore, Product, ProductInput, ProductStore, ProductSummary, StoreError,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const FRONTEND: &str = "http://localhost:5173";

pub fn test_app() -> Router {
    app_with_store(Arc::new(MemoryProductStore::new()))
}

pub fn app_with_store(store: Arc<dyn ProductStore>) -> Router {
    build_app(AppState::new(store), FRONTEND).unwrap()
}

/// Send a request and return status plus parsed JSON body (`Null` when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response should be valid JSON")
    };
    (status, json)
}

/// Create a product and return its id.
pub async fn create(app: &Router, name: &str, price: f64, availability: bool) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/products",
        Some(serde_json::json!({ "name": name, "price": price, "availability": availability })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

/// Store whose reads succeed (one fixed product) but whose writes always fail.
pub struct BrokenWritesStore {
    pub product: Product,
}

impl BrokenWritesStore {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        BrokenWritesStore {
            product: Product {
                id: 1,
                name: "Monitor".into(),
                price: 300.0,
                availability: true,
                created_at: now,
                updated_at: now,
            },
        }
    }
}

fn unavailable() -> StoreError {
    StoreError::Db(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ProductStore for BrokenWritesStore {
    async fn list_all(&self) -> Result<Vec<ProductSummary>, StoreError> {
        Err(unavailable())
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, StoreError> {
        Ok((id == self.product.id).then(|| self.product.clone()))
    }

    async fn create(&self, _input: &ProductInput) -> Result<Product, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: i32, _input: &ProductInput) -> Result<Option<Product>, StoreError> {
        Err(unavailable())
    }

    async fn toggle_availability(&self, _id: i32) -> Result<Option<Product>, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i32) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
