//! Validated `:id` path segment and product body.

use crate::error::AppError;
use crate::model::ProductInput;
use crate::validation::{as_int, id_rules, product_input, product_rules, validate};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use serde_json::{Map, Value};

/// Product id from the path, rejected with field errors unless it is an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let mut params = Map::new();
        params.insert("id".into(), Value::String(raw));
        let errors = validate(&id_rules(), &params, &Map::new());
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        params
            .get("id")
            .and_then(as_int)
            .map(ProductId)
            .ok_or_else(|| AppError::BadRequest("ID no válido".into()))
    }
}

/// Product body (name, price, availability) that passed every field rule.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductPayload(pub ProductInput);

#[async_trait]
impl<S> FromRequest<S> for ProductPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e.body_text(), "could not read request body");
            AppError::InvalidBody(e.status())
        })?;
        let body = if json { body_fields(&bytes)? } else { Map::new() };
        let errors = validate(&product_rules(), &Map::new(), &body);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        product_input(&body)
            .map(ProductPayload)
            .ok_or(AppError::InvalidBody(StatusCode::BAD_REQUEST))
    }
}

/// Only `application/json` bodies are parsed; anything else reads as no fields.
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// An empty body or a non-object JSON value has no fields; malformed JSON is rejected outright.
fn body_fields(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed JSON body");
            Err(AppError::InvalidBody(StatusCode::BAD_REQUEST))
        }
    }
}
