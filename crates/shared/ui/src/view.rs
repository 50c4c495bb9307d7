use marche_domain::constants::{
    DELIVERY_SLOT_CALENDAR_VIEW, DELIVERY_SLOTS_OVERVIEW_VIEW, ORDERS_SUPERVISION_VIEW,
};
use serde_json::{Value, json};

/// Props of the delivery-slot calendar view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySlotCalendarProps {
    /// Opaque product identifier, forwarded exactly as it came out of the route.
    pub product_id: String,
}

/// A client view mounted by a page, together with its props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMount {
    OrdersSupervision,
    DeliverySlotCalendar(DeliverySlotCalendarProps),
    DeliverySlotsOverview,
}

impl ViewMount {
    /// Component name the client bundle registers the view under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OrdersSupervision => ORDERS_SUPERVISION_VIEW,
            Self::DeliverySlotCalendar(_) => DELIVERY_SLOT_CALENDAR_VIEW,
            Self::DeliverySlotsOverview => DELIVERY_SLOTS_OVERVIEW_VIEW,
        }
    }

    /// Props in the shape the client component expects, `None` for views without props.
    #[must_use]
    pub fn props(&self) -> Option<Value> {
        match self {
            Self::OrdersSupervision | Self::DeliverySlotsOverview => None,
            Self::DeliverySlotCalendar(props) => Some(json!({ "productId": props.product_id })),
        }
    }
}
