use marche_derive::api_model;
use marche_ui::{DeliverySlotCalendarProps, Page, ViewMount};

/// Parameters of `/producer/delivery-slots/{product_id}`.
///
/// The identifier is opaque here. It is neither trimmed nor validated.
/// Field names must match the route placeholders.
#[api_model(rename_all = "snake_case", deny_unknown_fields)]
#[derive(Clone, PartialEq, Eq)]
pub struct DeliverySlotRoute {
    pub product_id: String,
}

impl From<String> for DeliverySlotRoute {
    fn from(product_id: String) -> Self {
        Self { product_id }
    }
}

/// `GET /producer/delivery-slots/{product_id}`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProducerDeliverySlotsPage;

impl Page for ProducerDeliverySlotsPage {
    type Params = DeliverySlotRoute;
    const TITLE: &'static str = "Créneaux de livraison";

    fn mount(route: DeliverySlotRoute) -> ViewMount {
        ViewMount::DeliverySlotCalendar(DeliverySlotCalendarProps { product_id: route.product_id })
    }
}

/// `GET /producer/delivery-slots/overview`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProducerDeliverySlotsOverviewPage;

impl Page for ProducerDeliverySlotsOverviewPage {
    type Params = ();
    const TITLE: &'static str = "Vue d'ensemble des créneaux";

    fn mount((): ()) -> ViewMount {
        ViewMount::DeliverySlotsOverview
    }
}
