use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use marche::kernel::prelude::ApiState;
use marche::kernel::server::uploads_router;
use marche::server::router::{assets_router, pages_router, system_router};
use tower_http::trace::TraceLayer;
use tracing::debug;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(title = "Marché", description = "Producer and back-office page shells"))]
struct ApiDoc;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let uploads = uploads_router(&state.assets, &state.config.storage.uploads_dir);
    debug!(
        uploads = state.assets.uploads_base_path(),
        dir = %state.config.storage.uploads_dir.display(),
        "Mounting uploads"
    );

    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(system_router())
        .merge(pages_router())
        .merge(assets_router())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/api", api_doc);

    Router::new()
        .merge(openapi_routes)
        .merge(uploads)
        .merge(scalar_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}
