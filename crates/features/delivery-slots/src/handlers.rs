use crate::page::{DeliverySlotRoute, ProducerDeliverySlotsOverviewPage, ProducerDeliverySlotsPage};
use axum::extract::Path;
use axum::response::Html;
use marche_derive::api_handler;
use marche_domain::constants::DELIVERY_SLOTS_TAG;
use marche_ui::Page;
use tracing::debug;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_handler(
    get,
    path = "/producer/delivery-slots/overview",
    responses((status = 200, description = "Delivery slots overview page", content_type = "text/html", body = String)),
    tag = DELIVERY_SLOTS_TAG,
)]
async fn overview_page() -> Html<String> {
    Html(ProducerDeliverySlotsOverviewPage::render(()))
}

#[api_handler(
    get,
    path = "/producer/delivery-slots/{product_id}",
    params(("product_id" = String, Path, description = "Product identifier, forwarded verbatim")),
    responses(
        (status = 200, description = "Delivery slot calendar page", content_type = "text/html", body = String),
        (status = 400, description = "Path segment is not valid UTF-8"),
    ),
    tag = DELIVERY_SLOTS_TAG,
)]
async fn calendar_page(Path(route): Path<DeliverySlotRoute>) -> Html<String> {
    debug!(product_id = %route.product_id, "Delivery slot calendar requested");
    Html(ProducerDeliverySlotsPage::render(route))
}

/// Routes of the delivery slots feature.
///
/// The literal `overview` route and the `{product_id}` route share a prefix; the router
/// always prefers the literal segment.
pub fn router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new()
        .routes(routes!(overview_page))
        .routes(routes!(calendar_page))
}
