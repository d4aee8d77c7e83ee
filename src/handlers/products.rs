//! Product handlers: list, read, create, update, toggle availability, delete.
//!
//! Handlers that change an existing product read it first, so a missing id
//! answers 404 before any write is attempted.

use crate::error::AppError;
use crate::extractors::{ProductId, ProductPayload};
use crate::model::{Product, ProductInput, ProductSummary};
use crate::response::{created_with_msg, message, success, success_with_msg};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

const NOT_FOUND: &str = "Producto no encontrado";

async fn find_product(state: &AppState, id: i32, failure: &'static str) -> Result<Product, AppError> {
    state
        .store
        .get(id)
        .await
        .map_err(AppError::store(failure))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

/// Products sorted by price, most expensive first.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Successful response", body = [ProductSummary]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state
        .store
        .list_all()
        .await
        .map_err(AppError::store("Error al obtener los productos"))?;
    Ok(success(products))
}

/// Return a product based on its unique ID.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = Product),
        (status = 400, description = "Bad Request - Invalid ID"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<impl IntoResponse, AppError> {
    let product = find_product(&state, id, "Error al obtener el producto").await?;
    Ok(success(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Bad Request - invalid input data"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ProductPayload(input): ProductPayload,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .store
        .create(&input)
        .await
        .map_err(AppError::store("Error al crear el producto"))?;
    tracing::info!(id = product.id, "product created");
    Ok(created_with_msg("Producto creado", product))
}

/// Replace name, price and availability of an existing product.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to update")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, description = "Bad Request - invalid input data"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    ProductPayload(input): ProductPayload,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error al actualizar el producto";
    find_product(&state, id, FAILURE).await?;
    let product = state
        .store
        .update(id, &input)
        .await
        .map_err(AppError::store(FAILURE))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success_with_msg("Producto actualizado", product))
}

/// Flip availability and return the product as stored afterwards.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to update")),
    responses(
        (status = 200, description = "Availability toggled", body = Product),
        (status = 400, description = "Bad Request - Invalid ID"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Error al actualizar la disponibilidad del producto";
    find_product(&state, id, FAILURE).await?;
    let product = state
        .store
        .toggle_availability(id)
        .await
        .map_err(AppError::store(FAILURE))?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(success(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 400, description = "Bad Request - Invalid ID"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<impl IntoResponse, AppError> {
    const FAILURE: &str = "Hubo un error al eliminar el producto.";
    find_product(&state, id, FAILURE).await?;
    let deleted = state.store.delete(id).await.map_err(AppError::store(FAILURE))?;
    if !deleted {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    tracing::info!(id, "product deleted");
    Ok(message("Producto eliminado correctamente"))
}
