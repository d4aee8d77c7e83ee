//! Application assembly: routes, CORS policy, request tracing.

use crate::error::{AppError, ConfigError};
use crate::routes::{common_routes, docs_routes, product_routes};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Full router. Cross-origin requests are only served for `frontend_origin`.
pub fn build_app(state: AppState, frontend_origin: &str) -> Result<Router, ConfigError> {
    let origin = HeaderValue::from_str(frontend_origin).map_err(|_| ConfigError::Invalid {
        name: "FRONTEND_URL",
        value: frontend_origin.to_string(),
    })?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin.clone()))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .nest("/api/products", product_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(origin, require_frontend_origin))
                .layer(cors),
        ))
}

/// Requests without an `Origin` header are not cross-origin and pass through.
async fn require_frontend_origin(State(allowed): State<HeaderValue>, req: Request, next: Next) -> Response {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        if *origin != allowed {
            tracing::warn!(origin = ?origin, "rejected cross-origin request");
            return AppError::Forbidden("Error de cors".into()).into_response();
        }
    }
    next.run(req).await
}
