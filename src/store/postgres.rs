//! PostgreSQL product store: connect, sync schema, CRUD, close.

use super::ProductStore;
use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::model::{Product, ProductInput, ProductSummary};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection, PgPool};

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";
const SUMMARY_COLUMNS: &str = "id, name, price, availability, created_at";

const PRODUCTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL CHECK (name <> ''),
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        availability BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Open a pool for `config`, creating the database first when asked to.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if config.create_database {
            ensure_database_exists(&config.options).await?;
        }
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.options.clone())
            .await?;
        tracing::info!(
            database = config.options.get_database().unwrap_or_default(),
            "connected to database"
        );
        Ok(PgProductStore { pool })
    }

    /// Create the products table if it does not exist yet.
    pub async fn sync_schema(&self) -> Result<(), StoreError> {
        sqlx::query(PRODUCTS_DDL).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

/// Create the target database when it is missing. Connects to the `postgres`
/// maintenance database to do so.
pub async fn ensure_database_exists(options: &PgConnectOptions) -> Result<(), StoreError> {
    let db_name = match options.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = options.clone().database("postgres").connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    conn.close().await?;
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Check and length violations become `Constraint`; everything else stays `Db`.
fn classify(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        // 22001: string_data_right_truncation
        if db.is_check_violation() || db.code().as_deref() == Some("22001") {
            return StoreError::Constraint(db.message().to_string());
        }
    }
    StoreError::Db(e)
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self) -> Result<Vec<ProductSummary>, StoreError> {
        let sql = format!("SELECT {} FROM products ORDER BY price DESC", SUMMARY_COLUMNS);
        let rows = sqlx::query_as::<_, ProductSummary>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, input: &ProductInput) -> Result<Product, StoreError> {
        let sql = format!(
            "INSERT INTO products (name, price, availability) VALUES ($1, $2, $3) RETURNING {}",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.availability)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update(&self, id: i32, input: &ProductInput) -> Result<Option<Product>, StoreError> {
        let sql = format!(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.availability)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn toggle_availability(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let result = sqlx::query(
            "UPDATE products SET availability = NOT availability, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
