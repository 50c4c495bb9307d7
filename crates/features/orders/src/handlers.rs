use crate::page::AdminOrdersSupervisionPage;
use axum::response::Html;
use marche_derive::api_handler;
use marche_domain::constants::ORDERS_TAG;
use marche_ui::Page;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_handler(
    get,
    path = "/admin/commandes/supervision",
    responses((status = 200, description = "Order supervision page", content_type = "text/html", body = String)),
    tag = ORDERS_TAG,
)]
async fn supervision_page() -> Html<String> {
    Html(AdminOrdersSupervisionPage::render(()))
}

/// Routes of the orders feature.
pub fn router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(supervision_page))
}
