#![cfg(feature = "server")]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use marche_delivery_slots::router;
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, String) {
    let (app, _) = router::<()>().split_for_parts();
    let request = Request::builder().uri(uri).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, String::from_utf8(body.to_vec()).expect("utf-8"))
}

#[tokio::test]
async fn product_route_mounts_the_calendar() {
    let (status, html) = get("/producer/delivery-slots/42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches("data-view=").count(), 1);
    assert!(html.contains(r#"data-view="DeliverySlotCalendar""#));
    assert!(html.contains("42"));
    assert!(html.contains("productId"));
}

#[tokio::test]
async fn overview_wins_over_the_parameter() {
    let (status, html) = get("/producer/delivery-slots/overview").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-view="DeliverySlotsOverview""#));
    assert!(!html.contains("DeliverySlotCalendar"));
    assert!(!html.contains("data-props"));
}

#[tokio::test]
async fn similar_literals_are_product_ids() {
    let (status, html) = get("/producer/delivery-slots/overviews").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"data-view="DeliverySlotCalendar""#));
    assert!(html.contains("overviews"));
}

#[tokio::test]
async fn percent_encoded_ids_are_decoded_once() {
    let (status, html) = get("/producer/delivery-slots/lot%20A").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("lot A"));
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let (status, _) = get("/producer/delivery-slots/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get("/producer/delivery-slots").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
