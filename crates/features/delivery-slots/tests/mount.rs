use marche_delivery_slots::{DeliverySlotRoute, ProducerDeliverySlotsOverviewPage, ProducerDeliverySlotsPage};
use marche_ui::{DeliverySlotCalendarProps, Page, ViewMount};
use proptest::prelude::*;

#[test]
fn overview_mounts_without_props() {
    let mount = ProducerDeliverySlotsOverviewPage::mount(());
    assert_eq!(mount, ViewMount::DeliverySlotsOverview);
    assert!(mount.props().is_none());
}

#[test]
fn calendar_receives_the_route_id() {
    let mount = ProducerDeliverySlotsPage::mount(DeliverySlotRoute::from("42".to_owned()));
    assert_eq!(
        mount,
        ViewMount::DeliverySlotCalendar(DeliverySlotCalendarProps { product_id: "42".to_owned() })
    );
}

#[test]
fn odd_ids_are_not_normalized() {
    for id in [" 42 ", "abc-XYZ", "00042", "çà été", "a%2Fb"] {
        let mount = ProducerDeliverySlotsPage::mount(DeliverySlotRoute::from(id.to_owned()));
        let ViewMount::DeliverySlotCalendar(props) = mount else {
            panic!("calendar view expected");
        };
        assert_eq!(props.product_id, id);
    }
}

proptest! {
    #[test]
    fn product_id_is_forwarded_verbatim(id in any::<String>()) {
        let mount = ProducerDeliverySlotsPage::mount(DeliverySlotRoute::from(id.clone()));
        prop_assert_eq!(mount.props(), Some(serde_json::json!({ "productId": id })));
    }
}

#[test]
fn route_record_uses_placeholder_names() {
    let route: DeliverySlotRoute =
        serde_json::from_value(serde_json::json!({ "product_id": "42" })).expect("route");
    assert_eq!(route, DeliverySlotRoute::from("42".to_owned()));

    let camel = serde_json::from_value::<DeliverySlotRoute>(serde_json::json!({ "productId": "42" }));
    assert!(camel.is_err());

    let extra = serde_json::from_value::<DeliverySlotRoute>(
        serde_json::json!({ "product_id": "42", "slot": "morning" }),
    );
    assert!(extra.is_err());
}
