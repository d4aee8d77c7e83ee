//! Product record and its request/list projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Longest product name the store accepts, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// A persisted product. `id` and both timestamps are assigned by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// The Product ID
    #[schema(example = 1)]
    pub id: i32,
    /// The Product name
    #[schema(example = "Monitor curvo 49 pulgadas")]
    pub name: String,
    /// The Product price
    #[schema(example = 300)]
    pub price: f64,
    /// The Product availability
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product as returned by the list endpoint (no `updatedAt`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        ProductSummary {
            id: p.id,
            name: p.name,
            price: p.price,
            availability: p.availability,
            created_at: p.created_at,
        }
    }
}

/// Writable fields, used for both create and full update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Monitor Curvo 49 pulgadas")]
    pub name: String,
    #[schema(example = 499)]
    pub price: f64,
    #[schema(example = false)]
    pub availability: bool,
}

impl ProductInput {
    /// Persistence-level invariant: a non-empty name of at most
    /// [`NAME_MAX_CHARS`] characters and a finite price above zero.
    pub fn violation(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("name must not be empty".into());
        }
        if self.name.chars().count() > NAME_MAX_CHARS {
            return Some(format!("name must be at most {} characters", NAME_MAX_CHARS));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Some(format!("price must be greater than zero, got {}", self.price));
        }
        None
    }
}
