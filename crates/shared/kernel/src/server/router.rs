use super::{assets, health};
use crate::security::AssetPolicy;
use axum::extract::FromRef;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// `/health`.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}

/// `/image`, resolving page image sources against the [`AssetPolicy`].
pub fn assets_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
    AssetPolicy: FromRef<S>,
{
    OpenApiRouter::<S>::new().routes(routes!(assets::image_handler))
}
