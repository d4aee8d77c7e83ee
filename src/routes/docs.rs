//! API documentation: Swagger UI at `/api/docs`, OpenAPI JSON next to it.

use crate::handlers::products;
use crate::model::{Product, ProductInput, ProductSummary};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Products REST API", version = "1.0.0", description = "API Docs for Products"),
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::toggle_availability,
        products::delete_product,
    ),
    components(schemas(Product, ProductSummary, ProductInput)),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;

/// GET /api/docs (interactive UI) and GET /api/docs/openapi.json
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
}
