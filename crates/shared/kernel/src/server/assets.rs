use crate::security::{AssetError, AssetPolicy, is_vector_image};
use axum::Router;
use axum::extract::{Query, Request, State};
use axum::http::header::{CONTENT_SECURITY_POLICY, X_CONTENT_TYPE_OPTIONS};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use marche_derive::api_handler;
use marche_domain::constants::ASSETS_TAG;
use serde::Deserialize;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, error};
use utoipa::IntoParams;

/// Sent with every inline SVG so embedded scripts never run.
pub const VECTOR_IMAGE_CSP: &str = "default-src 'self'; script-src 'none'; sandbox;";
pub const NOSNIFF: &str = "nosniff";

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::InvalidSource { .. } | Self::Url { .. } => StatusCode::BAD_REQUEST,
            Self::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{self}");
            return status.into_response();
        }

        debug!(status = status.as_u16(), "{self}");
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(super) struct ImageQuery {
    /// Upload path (`/uploads/...`) or absolute `http(s)` URL
    url: String,
}

#[api_handler(
    get,
    path = "/image",
    params(ImageQuery),
    responses(
        (status = 307, description = "Redirect to the permitted image location"),
        (status = 400, description = "Empty, malformed or unsupported image source"),
        (status = 403, description = "Image source not permitted by the asset policy"),
    ),
    tag = ASSETS_TAG,
)]
pub(super) async fn image_handler(
    State(policy): State<AssetPolicy>,
    Query(query): Query<ImageQuery>,
) -> Result<Redirect, AssetError> {
    let source = policy.resolve(&query.url)?;
    Ok(Redirect::temporary(source.location()))
}

async fn vector_image_guard(State(policy): State<AssetPolicy>, request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if !is_vector_image(path) {
        return next.run(request).await;
    }
    if let Err(err) = policy.check_vector_image(path) {
        return err.into_response();
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static(VECTOR_IMAGE_CSP));
    response
}

/// Serves files from `dir` under the policy's uploads base path.
///
/// Directory listings and index files are never served. Every response carries
/// `X-Content-Type-Options: nosniff`; SVG files are refused or sandboxed depending on the policy.
pub fn uploads_router<S>(policy: &AssetPolicy, dir: impl AsRef<Path>) -> Router<S>
where
    S: Send + Sync + Clone + 'static,
{
    let files = ServeDir::new(dir.as_ref()).append_index_html_on_directories(false);

    Router::<S>::new()
        .nest_service(policy.uploads_base_path(), files)
        .layer(middleware::from_fn_with_state(policy.clone(), vector_image_guard))
        .layer(SetResponseHeaderLayer::overriding(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(NOSNIFF)))
}
